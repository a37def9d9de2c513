//! Response envelopes and DTOs exchanged with the backend.
//!
//! Movement records stay as raw JSON until `normalize` maps them; contracts
//! are typed and converted into the core [`Contract`].

use finnza_core::contract::{
    CategoryTotal, CategoryTotals, Charge, ChargeStatus, Contract, ContractCategory,
    ContractStatus,
};
use finnza_core::movement::parse_date;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// `GET /api/{omie,bomcontrole}/movimentacoes` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementsEnvelope {
    /// Raw movement records.
    #[serde(default)]
    pub movimentacoes: Vec<Value>,
    /// Items across all pages.
    pub total: Option<u64>,
    /// Revenue over the whole range.
    pub total_receitas: Option<Decimal>,
    /// Expense over the whole range.
    pub total_despesas: Option<Decimal>,
    /// Net over the whole range.
    pub saldo_liquido: Option<Decimal>,
}

/// `GET /api/omie/contas-{pagar,receber}` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitlesEnvelope {
    /// Raw title records.
    #[serde(default)]
    pub registros: Vec<Value>,
    /// Items across all pages.
    #[serde(default)]
    pub total_de_registros: u64,
    /// Pages reported by Omie.
    pub total_de_paginas: Option<u32>,
    /// Current page.
    pub pagina: Option<u32>,
}

/// Customer embedded in a contract.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    /// Backend id.
    pub id: Option<u64>,
    /// Legal name.
    pub razao_social: Option<String>,
    /// Trade name.
    pub nome_fantasia: Option<String>,
    /// CPF or CNPJ.
    pub cpf_cnpj: Option<String>,
}

/// Charge embedded in a contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeDto {
    /// Backend id.
    pub id: Option<u64>,
    /// Billed value.
    #[serde(default)]
    pub valor: Decimal,
    /// Due date (`YYYY-MM-DD`).
    pub data_vencimento: Option<String>,
    /// Payment date (`YYYY-MM-DD`).
    pub data_pagamento: Option<String>,
    /// Provider status.
    pub status: Option<ChargeStatus>,
    /// Installment number.
    pub numero_parcela: Option<u32>,
}

impl From<ChargeDto> for Charge {
    fn from(dto: ChargeDto) -> Self {
        Self {
            id: dto.id.map(|id| id.to_string()).unwrap_or_default(),
            value: dto.valor,
            due_date: dto.data_vencimento.as_deref().and_then(parse_date),
            payment_date: dto.data_pagamento.as_deref().and_then(parse_date),
            status: dto.status.unwrap_or(ChargeStatus::Unknown),
            installment: dto.numero_parcela,
        }
    }
}

/// Contract as returned by `/api/contratos`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    /// Backend id.
    pub id: u64,
    /// Title.
    #[serde(default)]
    pub titulo: String,
    /// Customer.
    #[serde(default)]
    pub cliente: Option<ClientDto>,
    /// Contract value.
    #[serde(default)]
    pub valor_contrato: Decimal,
    /// Due date (`YYYY-MM-DD`).
    pub data_vencimento: Option<String>,
    /// Backend status (`PENDENTE`, `EM_DIA`, ...).
    pub status: Option<String>,
    /// Charges.
    #[serde(default)]
    pub cobrancas: Vec<ChargeDto>,
    /// Backend category (`EM_DIA`, `EM_ATRASO`, ...).
    pub categoria: Option<String>,
}

const DEFAULT_COUNTERPARTY: &str = "Cliente";

impl From<ContractDto> for Contract {
    fn from(dto: ContractDto) -> Self {
        let counterparty = dto
            .cliente
            .and_then(|c| {
                [c.razao_social, c.nome_fantasia]
                    .into_iter()
                    .flatten()
                    .find(|name| !name.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_COUNTERPARTY.to_string());

        Self {
            id: dto.id.to_string(),
            title: dto.titulo,
            counterparty,
            value: dto.valor_contrato,
            due_date: dto.data_vencimento.as_deref().and_then(parse_date),
            status: dto
                .status
                .as_deref()
                .map_or(ContractStatus::Pending, ContractStatus::parse),
            charges: dto.cobrancas.into_iter().map(Charge::from).collect(),
            category: dto.categoria.as_deref().and_then(ContractCategory::parse),
        }
    }
}

/// `GET /api/contratos/totais-categorias` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryTotalsDto {
    /// Every contract.
    pub total_contratos: u64,
    /// Sum of every contract.
    pub total_valor: Decimal,
    /// `em-dia` count.
    pub em_dia: u64,
    /// `pendente` count.
    pub pendente: u64,
    /// `em-atraso` count.
    pub em_atraso: u64,
    /// `inadimplente` count.
    pub inadimplente: u64,
    /// `em-dia` value.
    pub valor_em_dia: Decimal,
    /// `pendente` value.
    pub valor_pendente: Decimal,
    /// `em-atraso` value.
    pub valor_em_atraso: Decimal,
    /// `inadimplente` value.
    pub valor_inadimplente: Decimal,
}

impl From<CategoryTotalsDto> for CategoryTotals {
    fn from(dto: CategoryTotalsDto) -> Self {
        let total = |count, value| CategoryTotal { count, value };
        Self {
            current: total(dto.em_dia, dto.valor_em_dia),
            pending: total(dto.pendente, dto.valor_pendente),
            late: total(dto.em_atraso, dto.valor_em_atraso),
            delinquent: total(dto.inadimplente, dto.valor_inadimplente),
            overall: total(dto.total_contratos, dto.total_valor),
        }
    }
}

/// `POST /api/contratos/importar-asaas` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportReport {
    /// Contracts imported.
    pub contratos_importados: u64,
    /// Backend message.
    pub mensagem: String,
}

/// `POST /api/contratos/sincronizar-todos` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncReport {
    /// Contracts visited.
    pub total_contratos: u64,
    /// Contracts whose status changed.
    pub contratos_atualizados: u64,
    /// Charges whose status changed.
    pub cobrancas_atualizadas: u64,
    /// Contracts that failed to sync.
    pub erros: u64,
    /// Backend message.
    pub mensagem: String,
}
