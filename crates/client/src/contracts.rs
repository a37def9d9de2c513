//! Contract endpoints under `/api/contratos`.

use chrono::NaiveDate;
use finnza_core::contract::{CategoryTotals, Contract, ContractStatus, KanbanBoard};
use finnza_shared::AppResult;
use finnza_shared::types::SpringPage;
use serde_json::json;
use tracing::info;

use crate::http::{ApiClient, QueryParams, push_param};
use crate::wire::{CategoryTotalsDto, ContractDto, ImportReport, SyncReport};

const BASE: &str = "/api/contratos";

/// Sort used by the contract list.
pub const DEFAULT_SORT: &str = "dataCriacao,desc";

/// Page size used when the whole board is loaded at once.
pub const BOARD_PAGE_SIZE: u32 = 1000;

/// Billing type that means "no constraint".
const ANY_BILLING_TYPE: &str = "todos";

/// Filters for `GET /api/contratos/filtros`.
///
/// Unset or blank values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSearch {
    /// Customer id.
    pub client_id: Option<u64>,
    /// Contract status.
    pub status: Option<ContractStatus>,
    /// Free text matched by the backend.
    pub term: Option<String>,
    /// `BOLETO`, `PIX`, ... (`todos` means any).
    pub billing_type: Option<String>,
    /// Due on or after.
    pub due_date_ge: Option<NaiveDate>,
    /// Due on or before.
    pub due_date_le: Option<NaiveDate>,
    /// Paid on or after.
    pub payment_date_ge: Option<NaiveDate>,
    /// Paid on or before.
    pub payment_date_le: Option<NaiveDate>,
    /// Page (0-indexed).
    pub page: u32,
    /// Page size.
    pub size: u32,
}

impl ContractSearch {
    /// First page of `size` contracts with no filters.
    #[must_use]
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Query string for the backend.
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut params = page_params(self.page, self.size);
        if let Some(id) = self.client_id {
            params.push(("clienteId", id.to_string()));
        }
        push_param(&mut params, "status", self.status.map(ContractStatus::as_backend));
        push_param(&mut params, "termo", self.term.as_deref());
        push_param(
            &mut params,
            "billingType",
            self.billing_type
                .as_deref()
                .filter(|b| !b.trim().eq_ignore_ascii_case(ANY_BILLING_TYPE)),
        );

        let dates = [
            ("dueDateGe", self.due_date_ge),
            ("dueDateLe", self.due_date_le),
            ("paymentDateGe", self.payment_date_ge),
            ("paymentDateLe", self.payment_date_le),
        ];
        params.extend(
            dates
                .into_iter()
                .filter_map(|(key, date)| date.map(|d| (key, d.format("%Y-%m-%d").to_string()))),
        );
        params
    }
}

fn page_params(page: u32, size: u32) -> QueryParams {
    vec![("page", page.to_string()), ("size", size.to_string())]
}

fn to_contracts(page: SpringPage<ContractDto>) -> SpringPage<Contract> {
    page.map(Contract::from)
}

/// Client for the contract endpoints.
#[derive(Clone)]
pub struct ContractApi {
    api: ApiClient,
}

impl ContractApi {
    /// Creates a client over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /api/contratos`; `sort` defaults to [`DEFAULT_SORT`].
    pub async fn list(&self, page: u32, size: u32, sort: Option<&str>) -> AppResult<SpringPage<Contract>> {
        let mut params = page_params(page, size);
        params.push(("sort", sort.unwrap_or(DEFAULT_SORT).to_string()));
        let page: SpringPage<ContractDto> = self.api.get_json(BASE, &params).await?;
        Ok(to_contracts(page))
    }

    /// `GET /api/contratos/{id}`.
    pub async fn get(&self, id: u64) -> AppResult<Contract> {
        let dto: ContractDto = self.api.get_json(&format!("{BASE}/{id}"), &[]).await?;
        Ok(dto.into())
    }

    /// `GET /api/contratos/cliente/{id}`.
    pub async fn by_client(&self, client_id: u64, page: u32, size: u32) -> AppResult<SpringPage<Contract>> {
        let page: SpringPage<ContractDto> = self
            .api
            .get_json(&format!("{BASE}/cliente/{client_id}"), &page_params(page, size))
            .await?;
        Ok(to_contracts(page))
    }

    /// `GET /api/contratos/status/{STATUS}`.
    pub async fn by_status(
        &self,
        status: ContractStatus,
        page: u32,
        size: u32,
    ) -> AppResult<SpringPage<Contract>> {
        let path = format!("{BASE}/status/{}", status.as_backend());
        let page: SpringPage<ContractDto> = self.api.get_json(&path, &page_params(page, size)).await?;
        Ok(to_contracts(page))
    }

    /// `GET /api/contratos/filtros`.
    pub async fn search(&self, search: &ContractSearch) -> AppResult<SpringPage<Contract>> {
        let page: SpringPage<ContractDto> = self
            .api
            .get_json(&format!("{BASE}/filtros"), &search.to_query())
            .await?;
        Ok(to_contracts(page))
    }

    /// `GET /api/contratos/totais-categorias`.
    pub async fn category_totals(&self) -> AppResult<CategoryTotals> {
        let dto: CategoryTotalsDto = self
            .api
            .get_json(&format!("{BASE}/totais-categorias"), &[])
            .await?;
        Ok(dto.into())
    }

    /// `POST /api/contratos/{id}/sincronizar`.
    pub async fn sync(&self, id: u64) -> AppResult<Contract> {
        let dto: ContractDto = self
            .api
            .post_json(&format!("{BASE}/{id}/sincronizar"), &json!({}))
            .await?;
        info!(contract_id = id, "Contract synchronized");
        Ok(dto.into())
    }

    /// `POST /api/contratos/sincronizar-todos`.
    pub async fn sync_all(&self) -> AppResult<SyncReport> {
        let report: SyncReport = self
            .api
            .post_json(&format!("{BASE}/sincronizar-todos"), &json!({}))
            .await?;
        info!(
            contracts = report.total_contratos,
            updated = report.contratos_atualizados,
            errors = report.erros,
            "Contracts synchronized"
        );
        Ok(report)
    }

    /// `POST /api/contratos/importar-asaas`.
    pub async fn import_from_asaas(&self) -> AppResult<ImportReport> {
        let report: ImportReport = self
            .api
            .post_json(&format!("{BASE}/importar-asaas"), &json!({}))
            .await?;
        info!(imported = report.contratos_importados, "Contracts imported from Asaas");
        Ok(report)
    }

    /// Loads the first [`BOARD_PAGE_SIZE`] contracts matching `search` and
    /// lays them out as of `today`.
    pub async fn board(&self, search: &ContractSearch, today: NaiveDate) -> AppResult<KanbanBoard> {
        let search = ContractSearch {
            page: 0,
            size: BOARD_PAGE_SIZE,
            ..search.clone()
        };
        let page = self.search(&search).await?;
        Ok(KanbanBoard::build(&page.content, today))
    }
}
