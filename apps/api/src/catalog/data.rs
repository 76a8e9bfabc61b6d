//! Static industry catalog: packs on offer and the documents each industry carries.

use serde::Serialize;

use crate::documents::envelope::DocumentFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDoc {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Included in subset ("lite") packs.
    pub in_lite: bool,
}

/// Inclusion policy of a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackIncludes {
    Subset,
    All,
    AllPlusExtras,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackDefinition {
    pub id: &'static str,
    pub label: &'static str,
    /// Whole AUD.
    pub price: u32,
    pub formats: &'static [DocumentFormat],
    pub includes: PackIncludes,
}

#[derive(Debug)]
pub struct Industry {
    pub id: &'static str,
    pub label: &'static str,
    pub packs: &'static [PackDefinition],
    pub documents: &'static [CatalogDoc],
}

const fn lite(id: &'static str, title: &'static str, description: &'static str) -> CatalogDoc {
    CatalogDoc {
        id,
        title,
        description,
        in_lite: true,
    }
}

const fn doc(id: &'static str, title: &'static str, description: &'static str) -> CatalogDoc {
    CatalogDoc {
        id,
        title,
        description,
        in_lite: false,
    }
}

const PDF_ONLY: &[DocumentFormat] = &[DocumentFormat::Pdf];
const FULL_FORMATS: &[DocumentFormat] = &[DocumentFormat::Pdf, DocumentFormat::Docx];

const LITE_PACK: PackDefinition = PackDefinition {
    id: "lite",
    label: "Lite Pack",
    price: 79,
    formats: PDF_ONLY,
    includes: PackIncludes::Subset,
};

const PRO_PACK: PackDefinition = PackDefinition {
    id: "pro",
    label: "Pro Pack",
    price: 189,
    formats: FULL_FORMATS,
    includes: PackIncludes::All,
};

const STANDARD_PACKS: &[PackDefinition] = &[LITE_PACK, PRO_PACK];

const CONSTRUCTION_TRADES_DOCUMENTS: &[CatalogDoc] = &[
    lite("whs-policy", "Work Health and Safety Policy", "Top level WHS policy covering responsibilities, consultation, and continuous improvement."),
    lite("risk-assessment", "Risk Assessment Template", "Hazard identification, risk rating, and control measures."),
    lite("incident-reporting", "Incident Reporting Procedure", "Investigation, notification, and corrective actions."),
    lite("induction-checklist", "Site Induction Checklist", "Safety briefing and competency verification."),
    lite("ppe-policy", "Personal Protective Equipment Policy", "Selection, use, maintenance, and training."),
    doc("emergency-procedures", "Emergency Response Plan", "Evacuation, first aid, and emergency contacts."),
    doc("contractor-management", "Contractor Management Procedure", "Prequalification, induction, and monitoring."),
    doc("plant-equipment", "Plant and Equipment Register", "Inspection, maintenance, and operator competency."),
    doc("hazardous-substances", "Hazardous Substances Register", "SDS management and exposure controls."),
    doc("consultation-committee", "Health and Safety Committee Charter", "Structure, roles, and meeting procedures."),
    doc("training-matrix", "Training and Competency Matrix", "Skills assessment and refresher schedules."),
    doc("toolbox-talks", "Toolbox Talk Templates", "Weekly safety topics and sign off sheets."),
    doc("confined-spaces", "Confined Space Entry Procedure", "Permits, atmospheric testing, and rescue."),
    doc("working-heights", "Working at Heights Procedure", "Fall protection and rescue plans."),
    doc("manual-handling", "Manual Handling Assessment", "Lifting techniques and mechanical aids."),
    doc("noise-vibration", "Noise and Vibration Management", "Monitoring and health surveillance."),
];

const NDIS_DOCUMENTS: &[CatalogDoc] = &[
    lite("quality-assurance", "Quality Assurance Policy", "NDIS Quality Framework compliance and continuous improvement."),
    lite("participant-rights", "Participant Rights and Choice Policy", "Dignity, respect, and self-determination principles."),
    lite("incident-management", "Incident Management Procedure", "Reporting, investigation, and NDIS Commission notification."),
    lite("safeguarding-policy", "Safeguarding and Protection Policy", "Abuse prevention, detection, and response."),
    lite("service-agreement", "Participant Service Agreement Template", "Goals, supports, and service delivery terms."),
    doc("complaints-feedback", "Complaints and Feedback Procedure", "Resolution process and external advocacy."),
    doc("restrictive-practices", "Restrictive Practices Governance", "Approval, monitoring, and reduction strategies."),
    doc("medication-management", "Medication Management Procedure", "Administration, storage, and documentation."),
    doc("personal-care", "Personal Care and Intimate Support", "Privacy, dignity, and consent protocols."),
    doc("transport-policy", "Participant Transport Policy", "Vehicle safety and driver requirements."),
    doc("cultural-safety", "Cultural Safety and Inclusion", "Aboriginal, CALD, and LGBTI+ support."),
    doc("worker-screening", "Worker Screening and Suitability", "Background checks and ongoing monitoring."),
    doc("capacity-building", "Capacity Building and Skill Development", "Goal setting and progress measurement."),
    doc("community-participation", "Community Participation Support", "Social inclusion and networking."),
    doc("behaviour-support", "Positive Behaviour Support Plan", "Functional assessment and intervention strategies."),
    doc("emergency-management", "Emergency and Evacuation Procedures", "Participant specific emergency plans."),
];

const CHILDCARE_DOCUMENTS: &[CatalogDoc] = &[
    lite("child-protection", "Child Protection Policy", "Mandatory reporting, risk assessment, and staff training."),
    lite("supervision-policy", "Supervision and Ratios Policy", "Adult to child ratios and active supervision."),
    lite("behaviour-guidance", "Behaviour Guidance Policy", "Positive guidance strategies and prohibited practices."),
    lite("health-hygiene", "Health and Hygiene Procedures", "Illness exclusion, medication, and infection control."),
    lite("nutrition-food", "Nutrition and Food Safety Policy", "Menu planning, allergies, and kitchen hygiene."),
    doc("emergency-evacuation", "Emergency and Evacuation Procedures", "Drills, lockdown, and parent notification."),
    doc("excursion-policy", "Excursion and Transport Policy", "Risk assessment, supervision, and authorisation."),
    doc("enrolment-orientation", "Enrolment and Orientation Procedure", "Family information and settling in process."),
    doc("programming-planning", "Educational Program and Planning", "Learning outcomes and documentation."),
    doc("family-communication", "Family Communication and Partnerships", "Daily communication and feedback."),
    doc("staff-qualifications", "Staffing and Qualifications Policy", "Educator requirements and professional development."),
    doc("sun-protection", "Sun Protection Policy", "Shade, clothing, and sunscreen procedures."),
    doc("water-safety", "Water Safety and Swimming Policy", "Supervision ratios and safety equipment."),
    doc("sleep-rest", "Sleep and Rest Policy", "Safe sleeping practices and SIDS prevention."),
    doc("inclusion-diversity", "Inclusion and Diversity Policy", "Additional needs support and cultural respect."),
    doc("grievance-complaints", "Grievance and Complaints Procedure", "Family concerns and resolution process."),
];

const CLEANING_SERVICES_DOCUMENTS: &[CatalogDoc] = &[
    lite("chemical-handling", "Chemical Handling and SDS Procedure", "Decanting, labelling, and PPE."),
    lite("infection-control", "Infection Control Procedure", "Zones, contact times, and logs."),
    lite("site-risk-assessment", "Site Risk Assessment Template", "Hazard matrix and controls."),
    lite("equipment-maintenance", "Equipment Maintenance Register", "PAT test, servicing, and repairs."),
    doc("client-scope-worksheet", "Client Scope and Specification Worksheet", "Frequency, consumables, KPIs."),
    doc("quality-audit-checklist", "Quality Audit Checklist", "Scored audits and corrective actions."),
    doc("incident-form-cleaning", "Incident and Near Miss Form", "Investigation and corrective actions."),
    doc("sharps-procedure", "Sharps and Biohazard Procedure", "Containment and disposal."),
    doc("waste-management", "Waste Management Procedure", "Segregation and disposal."),
    doc("emergency-procedure", "Emergency Procedures", "Spills, fire, first aid."),
    doc("contractor-mgmt", "Contractor Management Procedure", "Induction and supervision."),
    doc("uniform-ppe", "Uniform and PPE Policy", "Standards and replacement."),
    doc("client-feedback-log", "Client Feedback and Complaints Log", "Capture and resolution."),
    doc("schedule-checklist", "Site Cleaning Schedule Checklist", "Daily and periodic tasks."),
    doc("security-access", "Security and Access Procedure", "Keys, codes, and privacy."),
    doc("mobile-safety", "Lone and Mobile Work Safety", "Check in and escalation."),
    doc("carpet-hardfloor", "Carpet and Hard Floor Care SOP", "Methods and controls."),
];

const FITNESS_GYMS_DOCUMENTS: &[CatalogDoc] = &[
    lite("client-screening", "Client Screening and PAR-Q", "Health questionnaire and clearance."),
    lite("informed-consent", "Informed Consent and Waiver", "Risks, benefits, and agreement."),
    lite("emergency-response-fitness", "Emergency Response Plan", "AED, first aid, incident steps."),
    lite("equipment-maintenance-fitness", "Equipment Maintenance Register", "Inspection and service logs."),
    lite("cleaning-disinfection-fitness", "Cleaning and Disinfection Schedule", "High touch surfaces and frequency."),
    doc("staff-qualifications", "Staff Qualifications and CPD Matrix", "Cert III, Cert IV, First Aid."),
    doc("class-operations", "Class Operations SOP", "Capacity, induction, and safety briefing."),
    doc("youth-policy", "Youth Participation and Supervision Policy", "Parental consent and ratios."),
    doc("incident-injury-fitness", "Incident and Injury Form", "Investigation and actions."),
    doc("membership-terms", "Membership Terms and Cancellations", "Billing cycles and cooling off."),
    doc("privacy-data-fitness", "Privacy and Data Handling", "Member data and security."),
    doc("marketing-consent", "Marketing Consent and Media Release", "Photo and video permissions."),
    doc("contractor-coach", "Contractor and Coach Agreement", "Scope, safety, and insurance."),
    doc("facility-checklist", "Daily Facility Safety Checklist", "Open and close checks."),
    doc("heat-hydration", "Heat and Hydration SOP", "Risk management for heat."),
    doc("pandemic-response", "Communicable Disease and Pandemic Response", "Precautions and closures."),
];

const BEAUTY_PERSONAL_CARE_DOCUMENTS: &[CatalogDoc] = &[
    lite("infection-control-beauty", "Infection Control Policy", "Hand hygiene, sterilisation, and barriers."),
    lite("skin-penetration", "Skin Penetration and Sterilisation Procedure", "Autoclave logs and validation."),
    lite("client-consultation", "Client Consultation and Consent", "Contraindications and signatures."),
    lite("aftercare-instructions", "Aftercare Instruction Sheets", "Per treatment aftercare."),
    lite("allergen-chemical", "Allergen and Chemical Safety", "Patch tests and SDS."),
    doc("cosmetic-injectables", "Cosmetic Injectables Governance", "Scope, delegation, and adverse event response."),
    doc("laser-safety", "Laser and IPL Safety Procedure", "Eye protection and signage."),
    doc("equipment-maintenance-beauty", "Equipment Maintenance and Calibration", "Logs and service records."),
    doc("incident-adverse", "Incident and Adverse Event Form", "Documentation and follow up."),
    doc("client-privacy-beauty", "Client Privacy and Records", "Retention and access."),
    doc("sharps-disposal", "Sharps and Clinical Waste Procedure", "Bins, storage, and disposal."),
    doc("complaints-beauty", "Complaints and Refunds Procedure", "Resolution and consumer law."),
    doc("consumables-register", "Consumables and Stock Register", "Batch tracking and expiry."),
    doc("practitioner-credentials", "Practitioner Credentials and CPD", "Registration and checks."),
    doc("environmental-cleaning", "Environmental Cleaning Checklist", "Room turnover and changeover."),
    doc("marketing-claims", "Marketing Claims and Before After Policy", "Evidence standards and consent."),
];

const HOSPITALITY_DOCUMENTS: &[CatalogDoc] = &[
    lite("food-safety-program", "Food Safety Program", "Processes and controls for safe food."),
    lite("haccp-plan", "HACCP Plan", "Hazards, CCPs, limits, and monitoring."),
    lite("allergen-management", "Allergen Management Procedure", "Cross contact controls and training."),
    lite("cleaning-sanitising", "Cleaning and Sanitising Schedule", "Equipment and surfaces."),
    lite("temperature-logs", "Temperature Control Logs", "Delivery, storage, cooking, cooling."),
    doc("supplier-approval", "Approved Supplier List and Verification", "Checks and documentation."),
    doc("pest-control", "Pest Control Procedure and Records", "Contractor visits and findings."),
    doc("personal-hygiene", "Personal Hygiene Policy", "Hand washing and illness reporting."),
    doc("recall-withdrawal", "Product Recall and Withdrawal Procedure", "Triggers and communications."),
    doc("waste-management-hosp", "Waste Management Procedure", "Disposal and recycling."),
    doc("equipment-maintenance-hosp", "Equipment Maintenance Register", "Servicing and calibration."),
    doc("alcohol-service", "Responsible Service of Alcohol Policy", "RSA checks and refusals."),
    doc("incident-form-hosp", "Incident and Customer Complaint Form", "Recording and resolutions."),
    doc("emergency-response-hosp", "Emergency Response Plan", "Evacuation and contacts."),
    doc("delivery-takeaway", "Delivery and Takeaway Food Safety", "Packaging and temperature control."),
    doc("staff-training-matrix-hosp", "Staff Training Matrix", "Food handler skills and refreshers."),
];

const HEALTH_SERVICES_DOCUMENTS: &[CatalogDoc] = &[
    lite("clinical-governance", "Clinical Governance Framework", "Roles, committees, and oversight."),
    lite("consent-policy", "Informed Consent Policy and Forms", "Capacity and documentation."),
    lite("privacy-health", "Privacy and Health Records", "Confidentiality and access."),
    lite("infection-prevention-health", "Infection Prevention and Control", "Standard and transmission based precautions."),
    lite("medication-safety", "Medication Safety Procedure", "Prescribing, dispensing, and administration."),
    doc("adverse-events", "Adverse Event and Incident Management", "Reporting and learning."),
    doc("emergency-preparedness", "Emergency Preparedness and Response", "Codes and drills."),
    doc("scope-credentialing", "Scope of Practice and Credentialing", "Verification and review."),
    doc("handover-communication", "Clinical Handover and Communication", "SBAR and escalation."),
    doc("device-maintenance", "Medical Device Maintenance and Calibration", "Registers and schedules."),
    doc("records-retention-health", "Records Management and Retention", "Retention and disposal."),
    doc("complaints-health", "Complaints and Feedback", "Consumer rights and responses."),
    doc("telehealth", "Telehealth Governance", "Security and consent."),
    doc("radiation-laser-health", "Radiation and Laser Safety", "Licensing and controls."),
    doc("cultural-safety-health", "Cultural Safety and Accessibility", "Interpreter access and inclusion."),
    doc("quality-improvement", "Quality Improvement Plan and Register", "Audits and actions."),
];

const RETAIL_ECOMMERCE_DOCUMENTS: &[CatalogDoc] = &[
    lite("privacy-policy-retail", "Privacy Policy", "Data collection, cookies, and rights."),
    lite("data-security", "Data Security and Access Controls", "Passwords, MFA, and roles."),
    lite("refund-returns", "Refunds and Returns Policy", "Consumer law compliance."),
    lite("shipping-fulfilment", "Shipping and Fulfilment Policy", "Carriers, times, and liabilities."),
    lite("terms-of-sale", "Terms of Sale", "Offer, acceptance, and payment."),
    doc("complaints-customer", "Customer Complaints Procedure", "Handling and resolution."),
    doc("product-safety", "Product Safety and Recalls", "Standards and recall steps."),
    doc("marketing-comms", "Marketing Communications and Consent", "Email and SMS consent."),
    doc("supplier-quality", "Supplier Quality and Ethics Policy", "Sourcing standards and audits."),
    doc("whs-retail", "Workplace Safety Policy", "Store hazards and controls."),
    doc("cash-handling", "Cash Handling and Reconciliation", "Controls and exceptions."),
    doc("anti-theft", "Loss Prevention and Anti Theft SOP", "CCTV, checks, and reporting."),
    doc("accessibility-web", "Website Accessibility Statement", "WCAG commitments."),
    doc("cookie-policy", "Cookie Policy", "Types, purpose, and choices."),
    doc("data-retention", "Data Retention Schedule", "Durations and deletion."),
    doc("third-party-marketplaces", "Marketplace and Platform Policy", "Listings and compliance."),
];

const FREELANCERS_COACHES_DOCUMENTS: &[CatalogDoc] = &[
    lite("client-agreement", "Client Services Agreement", "Scope, payment, IP, and term."),
    lite("scope-of-work", "Scope of Work Template", "Deliverables, milestones, and acceptance."),
    lite("privacy-freelance", "Privacy and Confidentiality", "Data handling and NDA."),
    lite("complaints-freelance", "Complaints and Dispute Resolution", "Process and timelines."),
    lite("code-of-conduct", "Professional Code of Conduct", "Ethics and boundaries."),
    doc("risk-assessment-freelance", "Work Health and Safety Risk Assessment", "Client sites and remote work."),
    doc("insurance-proof", "Insurance and Credentials Register", "Certificates and dates."),
    doc("marketing-use", "Marketing Consent and Case Studies Policy", "Attribution and permissions."),
    doc("data-security-freelance", "Information Security Basics", "Passwords, storage, backups."),
    doc("invoicing-policy", "Invoicing and Collections Policy", "Payment terms and follow up."),
    doc("refund-cancellation", "Refunds and Cancellations Policy", "Conditions and process."),
    doc("records-retention-freelance", "Records and Retention", "Durations and disposal."),
    doc("subcontractor-terms", "Subcontractor Terms", "Flow down clauses and safety."),
    doc("brand-guidelines", "Brand and Communications Guidelines", "Voice and approvals."),
];

const SMALL_BUSINESS_DOCUMENTS: &[CatalogDoc] = &[
    lite("code-of-conduct-smb", "Code of Conduct", "Values, behaviour, and conflicts."),
    lite("privacy-policy-smb", "Privacy Policy", "Collection, use, and rights."),
    lite("information-security", "Information Security Policy", "Access, MFA, and incident response."),
    lite("whs-policy-smb", "Work Health and Safety Policy", "Responsibilities and consultation."),
    lite("risk-management-smb", "Risk Management Procedure", "Identification and controls."),
    lite("incident-management-smb", "Incident and Near Miss Procedure", "Reporting and corrective actions."),
    doc("emergency-plan-smb", "Emergency and Business Continuity Plan", "Response and recovery."),
    doc("hr-policy-pack", "Human Resources Policy Pack", "Leave, performance, and discipline."),
    doc("anti-bullying", "Anti Bullying Harassment and EEO", "Standards and complaints."),
    doc("remote-work", "Remote and Flexible Work Policy", "Ergonomics and security."),
    doc("records-retention-smb", "Records Management and Retention", "Durations and disposal."),
    doc("supplier-ethics-smb", "Supplier and Procurement Policy", "Conflicts and modern slavery."),
    doc("environment-sustainability", "Environment and Sustainability Policy", "Waste and energy."),
    doc("customer-complaints-smb", "Customer Complaints Procedure", "Channels and SLAs."),
    doc("fraud-anti-bribery", "Fraud and Anti Bribery Policy", "Controls and reporting."),
    doc("data-breach-response", "Data Breach Response Plan", "Assessment and notification."),
];

const CONSTRUCTION_FULL_PACKS: &[PackDefinition] = &[
    LITE_PACK,
    PRO_PACK,
    PackDefinition {
        id: "construction-full",
        label: "Construction Compliance Pack",
        price: 349,
        formats: FULL_FORMATS,
        includes: PackIncludes::AllPlusExtras,
    },
];

const NDIS_FULL_PACKS: &[PackDefinition] = &[
    LITE_PACK,
    PRO_PACK,
    PackDefinition {
        id: "ndis-full",
        label: "NDIS Compliance Pack",
        price: 349,
        formats: FULL_FORMATS,
        includes: PackIncludes::AllPlusExtras,
    },
];

pub static INDUSTRIES: &[Industry] = &[
    Industry {
        id: "construction-trades",
        label: "Construction & Trades",
        packs: CONSTRUCTION_FULL_PACKS,
        documents: CONSTRUCTION_TRADES_DOCUMENTS,
    },
    Industry {
        id: "ndis",
        label: "NDIS Providers",
        packs: NDIS_FULL_PACKS,
        documents: NDIS_DOCUMENTS,
    },
    Industry {
        id: "childcare",
        label: "Childcare & Education",
        packs: STANDARD_PACKS,
        documents: CHILDCARE_DOCUMENTS,
    },
    Industry {
        id: "cleaning-services",
        label: "Cleaning Services",
        packs: STANDARD_PACKS,
        documents: CLEANING_SERVICES_DOCUMENTS,
    },
    Industry {
        id: "fitness-gyms",
        label: "Fitness Studios & Gyms",
        packs: STANDARD_PACKS,
        documents: FITNESS_GYMS_DOCUMENTS,
    },
    Industry {
        id: "beauty-personal-care",
        label: "Beauty & Personal Care",
        packs: STANDARD_PACKS,
        documents: BEAUTY_PERSONAL_CARE_DOCUMENTS,
    },
    Industry {
        id: "hospitality",
        label: "Hospitality",
        packs: STANDARD_PACKS,
        documents: HOSPITALITY_DOCUMENTS,
    },
    Industry {
        id: "health-services",
        label: "Health Services",
        packs: STANDARD_PACKS,
        documents: HEALTH_SERVICES_DOCUMENTS,
    },
    Industry {
        id: "retail-ecommerce",
        label: "Retail & E-Commerce",
        packs: STANDARD_PACKS,
        documents: RETAIL_ECOMMERCE_DOCUMENTS,
    },
    Industry {
        id: "freelancers-coaches",
        label: "Freelancers & Coaches",
        packs: STANDARD_PACKS,
        documents: FREELANCERS_COACHES_DOCUMENTS,
    },
    Industry {
        id: "small-business",
        label: "Generic Small Business Essentials",
        packs: STANDARD_PACKS,
        documents: SMALL_BUSINESS_DOCUMENTS,
    },
];
