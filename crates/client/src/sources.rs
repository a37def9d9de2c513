//! Upstream movement sources.
//!
//! Both sources return normalized movements; the JSON shape of each
//! upstream never leaves this module.

use async_trait::async_trait;
use finnza_core::date_range::DateRange;
use finnza_core::movement::{
    Movement, MovementFilter, MovementKind, MovementTotals, UpstreamSource, normalize_all,
};
use finnza_shared::AppResult;
use finnza_shared::types::PageMeta;
use tracing::info;

use crate::http::{ApiClient, QueryParams, push_param};
use crate::wire::{MovementsEnvelope, TitlesEnvelope};

/// Date field BomControle filters on.
pub const BOMCONTROLE_DATE_FIELD: &str = "DataVencimento";

/// What to ask an upstream for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementQuery {
    /// Period.
    pub range: DateRange,
    /// Server-side filters.
    pub filter: MovementFilter,
    /// 1-indexed page.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
}

impl MovementQuery {
    /// First page of `range` with no filters.
    #[must_use]
    pub fn unfiltered(range: DateRange, per_page: u32) -> Self {
        Self {
            range,
            filter: MovementFilter::default(),
            page: 1,
            per_page,
        }
    }
}

/// One upstream response, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementBatch {
    /// Normalized movements.
    pub movements: Vec<Movement>,
    /// Items across all pages.
    pub total: u64,
    /// Totals over the whole range.
    pub totals: MovementTotals,
    /// Whether `totals` came from the server rather than this page alone.
    pub server_totals: bool,
}

impl MovementBatch {
    /// Normalizes an envelope from `source`.
    #[must_use]
    pub fn from_envelope(source: UpstreamSource, envelope: MovementsEnvelope) -> Self {
        let movements = normalize_all(source, &envelope.movimentacoes);
        let totals = MovementTotals::resolve(
            envelope.total_receitas,
            envelope.total_despesas,
            envelope.saldo_liquido,
            &movements,
        );
        Self {
            total: envelope.total.unwrap_or(movements.len() as u64),
            server_totals: envelope.total_receitas.is_some(),
            movements,
            totals,
        }
    }
}

/// An upstream that lists movements for a period.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovementSource: Send + Sync {
    /// Upstream identity, used for logging.
    fn upstream(&self) -> UpstreamSource;

    /// Fetches one page of movements.
    async fn fetch(&self, query: &MovementQuery) -> AppResult<MovementBatch>;
}

fn push_filter(params: &mut QueryParams, filter: &MovementFilter) {
    push_param(params, "tipo", filter.kind.map(MovementKind::as_query));
    push_param(params, "categoria", filter.category.as_deref());
    push_param(params, "textoPesquisa", filter.search_text.as_deref());
}

/// Query string for `/api/omie/movimentacoes`.
#[must_use]
pub fn omie_query(query: &MovementQuery) -> QueryParams {
    let mut params = QueryParams::new();
    push_param(&mut params, "dataInicio", Some(&query.range.start_iso()));
    push_param(&mut params, "dataFim", Some(&query.range.end_iso()));
    params.push(("pagina", query.page.to_string()));
    params.push(("registrosPorPagina", query.per_page.to_string()));
    push_filter(&mut params, &query.filter);
    params
}

/// Query string for `/api/bomcontrole/movimentacoes`.
#[must_use]
pub fn bomcontrole_query(query: &MovementQuery) -> QueryParams {
    let mut params = QueryParams::new();
    push_param(&mut params, "dataInicio", Some(&query.range.start_iso()));
    push_param(&mut params, "dataTermino", Some(&query.range.end_iso()));
    params.push(("tipoData", BOMCONTROLE_DATE_FIELD.to_string()));
    push_filter(&mut params, &query.filter);
    params.push(("itensPorPagina", query.per_page.to_string()));
    params.push(("numeroDaPagina", query.page.to_string()));
    params
}

/// A page of payable or receivable titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlesPage {
    /// Normalized titles.
    pub titles: Vec<Movement>,
    /// Pagination as reported by Omie.
    pub meta: PageMeta,
}

impl TitlesPage {
    fn from_envelope(envelope: TitlesEnvelope, page: u32, per_page: u32, is_debit: bool) -> Self {
        let mut titles = normalize_all(UpstreamSource::Omie, &envelope.registros);
        for title in &mut titles {
            title.is_debit = is_debit;
        }
        let mut meta = PageMeta::new(
            envelope.pagina.unwrap_or(page),
            per_page,
            envelope.total_de_registros,
        );
        if let Some(pages) = envelope.total_de_paginas.filter(|p| *p > 0) {
            meta.total_pages = pages;
        }
        Self { titles, meta }
    }
}

/// Omie movements, payables and receivables.
#[derive(Clone)]
pub struct OmieSource {
    api: ApiClient,
}

impl OmieSource {
    /// Creates a source over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /api/omie/contas-pagar`.
    pub async fn payables(&self, range: &DateRange, page: u32, per_page: u32) -> AppResult<TitlesPage> {
        self.titles("/api/omie/contas-pagar", range, page, per_page, true)
            .await
    }

    /// `GET /api/omie/contas-receber`.
    pub async fn receivables(
        &self,
        range: &DateRange,
        page: u32,
        per_page: u32,
    ) -> AppResult<TitlesPage> {
        self.titles("/api/omie/contas-receber", range, page, per_page, false)
            .await
    }

    async fn titles(
        &self,
        path: &str,
        range: &DateRange,
        page: u32,
        per_page: u32,
        is_debit: bool,
    ) -> AppResult<TitlesPage> {
        let query = MovementQuery {
            page,
            per_page,
            ..MovementQuery::unfiltered(*range, per_page)
        };
        let mut params = omie_query(&query);
        params.retain(|(k, _)| matches!(*k, "dataInicio" | "dataFim" | "pagina" | "registrosPorPagina"));

        let envelope: TitlesEnvelope = self.api.get_json(path, &params).await?;
        let page = TitlesPage::from_envelope(envelope, page, per_page, is_debit);
        info!(path, titles = page.titles.len(), total = page.meta.total, "Titles loaded");
        Ok(page)
    }
}

#[async_trait]
impl MovementSource for OmieSource {
    fn upstream(&self) -> UpstreamSource {
        UpstreamSource::Omie
    }

    async fn fetch(&self, query: &MovementQuery) -> AppResult<MovementBatch> {
        let envelope: MovementsEnvelope = self
            .api
            .get_json("/api/omie/movimentacoes", &omie_query(query))
            .await?;
        Ok(MovementBatch::from_envelope(UpstreamSource::Omie, envelope))
    }
}

/// BomControle movements.
#[derive(Clone)]
pub struct BomControleSource {
    api: ApiClient,
}

impl BomControleSource {
    /// Creates a source over `api`.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MovementSource for BomControleSource {
    fn upstream(&self) -> UpstreamSource {
        UpstreamSource::BomControle
    }

    async fn fetch(&self, query: &MovementQuery) -> AppResult<MovementBatch> {
        let envelope: MovementsEnvelope = self
            .api
            .get_json("/api/bomcontrole/movimentacoes", &bomcontrole_query(query))
            .await?;
        Ok(MovementBatch::from_envelope(UpstreamSource::BomControle, envelope))
    }
}
