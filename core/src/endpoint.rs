//! Catalogue of the registry's resources and the parameters each accepts.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SudregError};
use crate::params::{
    ParamSpec, COMPANY_NAME, EXPAND_RELATIONS, HISTORY_COLUMNS, IDENTIFIER, IDENTIFIER_TYPE, LIMIT,
    NO_DATA_ERROR, OFFSET, OMIT_NULLS, ONLY_ACTIVE, SNAPSHOT_ID,
};

const CODEBOOK: ParamSpec = ParamSpec {
    required: &[],
    optional: &[EXPAND_RELATIONS, HISTORY_COLUMNS, SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

const HISTORY: ParamSpec = ParamSpec {
    required: &[],
    optional: &[HISTORY_COLUMNS, SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

const PLAIN: ParamSpec = ParamSpec {
    required: &[],
    optional: &[SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

const PAGED: ParamSpec = ParamSpec {
    required: &[],
    optional: &[OFFSET, LIMIT, SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

const PAGED_EXPANDED: ParamSpec = ParamSpec {
    required: &[],
    optional: &[EXPAND_RELATIONS, OFFSET, LIMIT, SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

const SUBJECTS: ParamSpec = ParamSpec {
    required: &[],
    optional: &[COMPANY_NAME, ONLY_ACTIVE, OFFSET, LIMIT, SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

const DETAILS: ParamSpec = ParamSpec {
    required: &[IDENTIFIER_TYPE, IDENTIFIER],
    optional: &[EXPAND_RELATIONS, SNAPSHOT_ID, NO_DATA_ERROR, OMIT_NULLS],
};

// Snapshots describe what snapshot_id may refer to, so they cannot be pinned.
const SNAPSHOTS: ParamSpec = ParamSpec {
    required: &[],
    optional: &[NO_DATA_ERROR, OMIT_NULLS],
};

/// One resource of the registry API, addressed by its path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    BrisLegalForms,
    BrisRegisters,
    Counts,
    SubjectDetails,
    BranchActivities,
    Countries,
    EmailAddresses,
    BranchEmailAddresses,
    RegisteredActivities,
    AnnualFinancialReports,
    ForeignRegisters,
    Languages,
    Proceedings,
    CompanyNames,
    ShortCompanyNames,
    CompanyNameTranslations,
    ShortCompanyNameTranslations,
    Seats,
    LegalForms,
    PredominantActivities,
    BusinessObjects,
    ShareCapitals,
    BranchNames,
    ShortBranchNames,
    BranchSeats,
    Announcements,
    Changes,
    Subjects,
    Snapshots,
    ActivityClassification,
    Statuses,
    Courts,
    Currencies,
    FinancialDocumentTypes,
    ProceedingTypes,
    LegalFormTypes,
}

impl Endpoint {
    pub const ALL: [Endpoint; 36] = [
        Endpoint::BrisLegalForms,
        Endpoint::BrisRegisters,
        Endpoint::Counts,
        Endpoint::SubjectDetails,
        Endpoint::BranchActivities,
        Endpoint::Countries,
        Endpoint::EmailAddresses,
        Endpoint::BranchEmailAddresses,
        Endpoint::RegisteredActivities,
        Endpoint::AnnualFinancialReports,
        Endpoint::ForeignRegisters,
        Endpoint::Languages,
        Endpoint::Proceedings,
        Endpoint::CompanyNames,
        Endpoint::ShortCompanyNames,
        Endpoint::CompanyNameTranslations,
        Endpoint::ShortCompanyNameTranslations,
        Endpoint::Seats,
        Endpoint::LegalForms,
        Endpoint::PredominantActivities,
        Endpoint::BusinessObjects,
        Endpoint::ShareCapitals,
        Endpoint::BranchNames,
        Endpoint::ShortBranchNames,
        Endpoint::BranchSeats,
        Endpoint::Announcements,
        Endpoint::Changes,
        Endpoint::Subjects,
        Endpoint::Snapshots,
        Endpoint::ActivityClassification,
        Endpoint::Statuses,
        Endpoint::Courts,
        Endpoint::Currencies,
        Endpoint::FinancialDocumentTypes,
        Endpoint::ProceedingTypes,
        Endpoint::LegalFormTypes,
    ];

    /// Path segment relative to the API base.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::BrisLegalForms => "bris_pravni_oblici",
            Endpoint::BrisRegisters => "bris_registri",
            Endpoint::Counts => "counts",
            Endpoint::SubjectDetails => "detalji_subjekta",
            Endpoint::BranchActivities => "djelatnosti_podruznica",
            Endpoint::Countries => "drzave",
            Endpoint::EmailAddresses => "email_adrese",
            Endpoint::BranchEmailAddresses => "email_adrese_podruznica",
            Endpoint::RegisteredActivities => "evidencijske_djelatnosti",
            Endpoint::AnnualFinancialReports => "gfi",
            Endpoint::ForeignRegisters => "inozemni_registri",
            Endpoint::Languages => "jezici",
            Endpoint::Proceedings => "postupci",
            Endpoint::CompanyNames => "tvrtke",
            Endpoint::ShortCompanyNames => "skracene_tvrtke",
            Endpoint::CompanyNameTranslations => "prijevodi_tvrtki",
            Endpoint::ShortCompanyNameTranslations => "prijevodi_skracenih_tvrtki",
            Endpoint::Seats => "sjedista",
            Endpoint::LegalForms => "pravni_oblici",
            Endpoint::PredominantActivities => "pretezite_djelatnosti",
            Endpoint::BusinessObjects => "predmeti_poslovanja",
            Endpoint::ShareCapitals => "temeljni_kapitali",
            Endpoint::BranchNames => "nazivi_podruznica",
            Endpoint::ShortBranchNames => "skraceni_nazivi_podruznica",
            Endpoint::BranchSeats => "sjedista_podruznica",
            Endpoint::Announcements => "objave_priopcenja",
            Endpoint::Changes => "promjene",
            Endpoint::Subjects => "subjekti",
            Endpoint::Snapshots => "snapshots",
            Endpoint::ActivityClassification => "nacionalna_klasifikacija_djelatnosti",
            Endpoint::Statuses => "statusi",
            Endpoint::Courts => "sudovi",
            Endpoint::Currencies => "valute",
            Endpoint::FinancialDocumentTypes => "vrste_gfi_dokumenata",
            Endpoint::ProceedingTypes => "vrste_postupaka",
            Endpoint::LegalFormTypes => "vrste_pravnih_oblika",
        }
    }

    pub fn spec(self) -> ParamSpec {
        match self {
            Endpoint::BrisLegalForms
            | Endpoint::BrisRegisters
            | Endpoint::Courts
            | Endpoint::Currencies => CODEBOOK,
            Endpoint::Countries
            | Endpoint::Languages
            | Endpoint::ActivityClassification
            | Endpoint::LegalFormTypes => HISTORY,
            Endpoint::Counts
            | Endpoint::Statuses
            | Endpoint::FinancialDocumentTypes
            | Endpoint::ProceedingTypes => PLAIN,
            Endpoint::LegalForms | Endpoint::BusinessObjects => PAGED_EXPANDED,
            Endpoint::Subjects => SUBJECTS,
            Endpoint::SubjectDetails => DETAILS,
            Endpoint::Snapshots => SNAPSHOTS,
            Endpoint::BranchActivities
            | Endpoint::EmailAddresses
            | Endpoint::BranchEmailAddresses
            | Endpoint::RegisteredActivities
            | Endpoint::AnnualFinancialReports
            | Endpoint::ForeignRegisters
            | Endpoint::Proceedings
            | Endpoint::CompanyNames
            | Endpoint::ShortCompanyNames
            | Endpoint::CompanyNameTranslations
            | Endpoint::ShortCompanyNameTranslations
            | Endpoint::Seats
            | Endpoint::PredominantActivities
            | Endpoint::ShareCapitals
            | Endpoint::BranchNames
            | Endpoint::ShortBranchNames
            | Endpoint::BranchSeats
            | Endpoint::Announcements
            | Endpoint::Changes => PAGED,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = SudregError;

    fn from_str(s: &str) -> Result<Self> {
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.path() == s)
            .ok_or_else(|| SudregError::Validation(format!("unknown endpoint `{s}`")))
    }
}
