/// The fixed regulation taxonomy the model classifies against, rendered into
/// the prompt as a single comma-separated list. "Unknown" is always a valid
/// answer so the model never has to invent a regime.
pub const REGULATION_TAXONOMY: &str =
    "GDPR, UK GDPR, HIPAA, SOX, ITAR, SEC, FCPA, PCI-DSS, RBI, SEBI, IT Act, \
     CCPA, CPRA, GLBA, FERPA, COPPA, NIST, ISO 27001, SOC 2, SOC 1, SOC 3, \
     FINRA, MiFID II, EMIR, DORA, eIDAS, PIPEDA, LGPD, PDPA, APPI, POPIA, \
     BDSG, Swiss FADP, CIS Controls, NYDFS, MAS TRM, Basel III, AML/KYC, \
     OFAC, EAR, Export Control Act, Bank Secrecy Act, FedRAMP, FISMA, \
     HITECH, CMMC, CSA STAR, IRAP, ENS, NIS2, PSD2, ePrivacy Directive, \
     DPA 2018 (UK), PECR, PRA/FCA (UK), OSFI (Canada), HKMA, SAMA, \
     DFSA, DIFC, QFCRA, APRA CPS 234, OAIC (Australia), Privacy Act 1988, \
     Brazil LGPD, Mexico Federal Data Law, Chile Data Protection Bill, \
     South Africa POPIA, Kenya Data Protection Act, Nigeria NDPR, \
     Singapore PDPA, Malaysia PDPA, India DPDP Act 2023, China PIPL, \
     China CSL, China DSL, Russia Federal Data Law 152-FZ, UAE PDPL, \
     Qatar PDP Law, Bahrain PDPL, Turkey KVKK, Unknown";
