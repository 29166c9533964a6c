//! Blocking client for the court registry data API.
//!
//! # Design
//! `SudregClient` holds only validated configuration and a `Transport`; it
//! carries no mutable state between calls. Every call goes through the same
//! three steps: `build_request` turns an endpoint and a `Query` into an
//! `HttpRequest`, the transport executes it, and `parse_response` hands the
//! JSON body back untouched. Build and parse never touch the network, so the
//! request contract can be tested without a server. There are no retries:
//! a failed call is returned to the caller as-is.

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, SUBSCRIPTION_KEY_HEADER};
use crate::endpoint::Endpoint;
use crate::error::{Result, SudregError};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{
    CodebookOptions, IdentifierType, Page, Query, SubjectFilter, COMPANY_NAME, EXPAND_RELATIONS,
    HISTORY_COLUMNS, IDENTIFIER, IDENTIFIER_TYPE, NO_DATA_ERROR, OMIT_NULLS, ONLY_ACTIVE,
    SNAPSHOT_ID,
};
use crate::transport::{Transport, UreqTransport};

/// Client for one registry deployment, authenticated by a subscription key.
#[derive(Debug, Clone)]
pub struct SudregClient<T = UreqTransport> {
    config: ClientConfig,
    api_base: Url,
    transport: T,
}

impl SudregClient<UreqTransport> {
    /// Client for the default deployment using only a subscription key.
    pub fn new(subscription_key: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(subscription_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SudregClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let api_base = config.api_base()?;
        Ok(Self {
            config,
            api_base,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve `endpoint` and `query` into a request, without sending it.
    ///
    /// Session settings from the configuration are appended after the
    /// caller's parameters, for endpoints that accept them.
    pub fn build_request(&self, endpoint: Endpoint, query: &Query) -> Result<HttpRequest> {
        let spec = endpoint.spec();
        let mut query = query.clone();
        if spec.accepts(SNAPSHOT_ID) && !query.contains(SNAPSHOT_ID) {
            query = query.count(SNAPSHOT_ID, self.config.snapshot_id);
        }
        if !query.contains(NO_DATA_ERROR) {
            query = query.flag(NO_DATA_ERROR, self.config.no_data_error);
        }
        if !query.contains(OMIT_NULLS) {
            query = query.flag(OMIT_NULLS, self.config.omit_nulls);
        }
        spec.check(endpoint.path(), &query)?;

        let mut url = self
            .api_base
            .join(endpoint.path())
            .map_err(|e| SudregError::Configuration(format!("cannot resolve `{endpoint}`: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }

        Ok(HttpRequest {
            url: url.into(),
            headers: vec![
                (
                    SUBSCRIPTION_KEY_HEADER.to_string(),
                    self.config.subscription_key.expose().to_string(),
                ),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        })
    }

    /// Interpret a response: 2xx bodies are returned as parsed JSON, anything
    /// else becomes `SudregError::Api`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        if !response.is_success() {
            let body = (!response.body.is_empty())
                .then(|| String::from_utf8_lossy(&response.body).into_owned());
            return Err(SudregError::Api {
                status: response.status,
                body,
            });
        }
        serde_json::from_slice(&response.body)
            .map_err(|e| SudregError::Deserialization(e.to_string()))
    }

    /// Issue one GET against `endpoint`.
    pub fn get(&self, endpoint: Endpoint, query: &Query) -> Result<Value> {
        let request = self.build_request(endpoint, query)?;
        debug!(%endpoint, url = %request.url, "sending registry request");
        let response = self.transport.execute(&request)?;
        debug!(%endpoint, status = response.status, "registry responded");
        self.parse_response(response)
    }

    fn codebook(&self, endpoint: Endpoint, options: CodebookOptions) -> Result<Value> {
        let query = Query::new()
            .flag(EXPAND_RELATIONS, options.expand_relations)
            .flag(HISTORY_COLUMNS, options.history_columns);
        self.get(endpoint, &query)
    }

    fn history(&self, endpoint: Endpoint, history_columns: Option<bool>) -> Result<Value> {
        self.get(endpoint, &Query::new().flag(HISTORY_COLUMNS, history_columns))
    }

    fn paged(&self, endpoint: Endpoint, expand_relations: Option<bool>, page: Page) -> Result<Value> {
        let query = page.apply(Query::new().flag(EXPAND_RELATIONS, expand_relations));
        self.get(endpoint, &query)
    }

    /// Everything known about one subject, collected into a single object.
    pub fn subject_details(
        &self,
        id_type: IdentifierType,
        identifier: &str,
        expand_relations: Option<bool>,
    ) -> Result<Value> {
        let query = Query::new()
            .push(IDENTIFIER_TYPE, id_type.as_str())
            .push(IDENTIFIER, identifier)
            .flag(EXPAND_RELATIONS, expand_relations);
        self.get(Endpoint::SubjectDetails, &query)
    }

    /// Basic data on subjects, optionally filtered by company name.
    pub fn subjects(&self, filter: &SubjectFilter) -> Result<Value> {
        let query = Query::new()
            .text(COMPANY_NAME, filter.company_name.as_deref())
            .flag(ONLY_ACTIVE, filter.only_active);
        self.get(Endpoint::Subjects, &filter.page.apply(query))
    }

    /// Registry snapshots that can currently be requested by `snapshot_id`.
    pub fn snapshots(&self) -> Result<Value> {
        self.get(Endpoint::Snapshots, &Query::new())
    }

    /// Total and active row counts for every resource.
    pub fn counts(&self) -> Result<Value> {
        self.get(Endpoint::Counts, &Query::new())
    }

    pub fn statuses(&self) -> Result<Value> {
        self.get(Endpoint::Statuses, &Query::new())
    }

    pub fn financial_document_types(&self) -> Result<Value> {
        self.get(Endpoint::FinancialDocumentTypes, &Query::new())
    }

    /// Kinds of proceedings (bankruptcy, liquidation, ...).
    pub fn proceeding_types(&self) -> Result<Value> {
        self.get(Endpoint::ProceedingTypes, &Query::new())
    }

    /// Legal forms as classified by the EU business registers interconnection.
    pub fn bris_legal_forms(&self, options: CodebookOptions) -> Result<Value> {
        self.codebook(Endpoint::BrisLegalForms, options)
    }

    pub fn bris_registers(&self, options: CodebookOptions) -> Result<Value> {
        self.codebook(Endpoint::BrisRegisters, options)
    }

    pub fn courts(&self, options: CodebookOptions) -> Result<Value> {
        self.codebook(Endpoint::Courts, options)
    }

    pub fn currencies(&self, options: CodebookOptions) -> Result<Value> {
        self.codebook(Endpoint::Currencies, options)
    }

    pub fn countries(&self, history_columns: Option<bool>) -> Result<Value> {
        self.history(Endpoint::Countries, history_columns)
    }

    pub fn languages(&self, history_columns: Option<bool>) -> Result<Value> {
        self.history(Endpoint::Languages, history_columns)
    }

    /// National classification of activities (NKD).
    pub fn activity_classification(&self, history_columns: Option<bool>) -> Result<Value> {
        self.history(Endpoint::ActivityClassification, history_columns)
    }

    pub fn legal_form_types(&self, history_columns: Option<bool>) -> Result<Value> {
        self.history(Endpoint::LegalFormTypes, history_columns)
    }

    pub fn legal_forms(&self, expand_relations: Option<bool>, page: Page) -> Result<Value> {
        self.paged(Endpoint::LegalForms, expand_relations, page)
    }

    pub fn business_objects(&self, expand_relations: Option<bool>, page: Page) -> Result<Value> {
        self.paged(Endpoint::BusinessObjects, expand_relations, page)
    }

    pub fn branch_activities(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::BranchActivities, None, page)
    }

    pub fn email_addresses(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::EmailAddresses, None, page)
    }

    pub fn branch_email_addresses(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::BranchEmailAddresses, None, page)
    }

    pub fn registered_activities(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::RegisteredActivities, None, page)
    }

    /// Records of submitted annual financial reports (GFI).
    pub fn annual_financial_reports(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::AnnualFinancialReports, None, page)
    }

    pub fn foreign_registers(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::ForeignRegisters, None, page)
    }

    pub fn proceedings(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::Proceedings, None, page)
    }

    pub fn company_names(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::CompanyNames, None, page)
    }

    pub fn short_company_names(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::ShortCompanyNames, None, page)
    }

    pub fn company_name_translations(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::CompanyNameTranslations, None, page)
    }

    pub fn short_company_name_translations(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::ShortCompanyNameTranslations, None, page)
    }

    pub fn seats(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::Seats, None, page)
    }

    pub fn predominant_activities(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::PredominantActivities, None, page)
    }

    pub fn share_capitals(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::ShareCapitals, None, page)
    }

    pub fn branch_names(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::BranchNames, None, page)
    }

    pub fn short_branch_names(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::ShortBranchNames, None, page)
    }

    pub fn branch_seats(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::BranchSeats, None, page)
    }

    pub fn announcements(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::Announcements, None, page)
    }

    pub fn changes(&self, page: Page) -> Result<Value> {
        self.paged(Endpoint::Changes, None, page)
    }
}
