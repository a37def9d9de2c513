//! Normalization of upstream movement records into [`Movement`].
//!
//! Each upstream gets its own mapping table. Lookups go through
//! [`Fields`], so naming variants of the same key resolve alike and a
//! malformed record degrades to defaults instead of failing the batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::fields::Fields;
use super::types::Movement;

/// Upstream a movement record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamSource {
    /// Omie ERP (`/api/omie`), snake_case records.
    Omie,
    /// BomControle (`/api/bomcontrole`), PascalCase records.
    BomControle,
}

impl UpstreamSource {
    /// Returns the string representation of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Omie => "omie",
            Self::BomControle => "bomcontrole",
        }
    }
}

impl std::fmt::Display for UpstreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate keys for each canonical field, in priority order.
struct FieldMap {
    id: &'static [&'static str],
    due_date: &'static [&'static str],
    accounting_date: &'static [&'static str],
    settlement_date: &'static [&'static str],
    name: &'static [&'static str],
    note: &'static [&'static str],
    counterparty: &'static [&'static str],
    category: &'static [&'static str],
    status: &'static [&'static str],
    installment: &'static [&'static str],
    installment_count: &'static [&'static str],
    payment_method: &'static [&'static str],
    default_name: &'static str,
}

const OMIE: FieldMap = FieldMap {
    id: &[
        "codigo_lancamento_omie",
        "codigo_lancamento_integracao",
        "codigo_lancamento",
    ],
    due_date: &["data_vencimento", "data_pagamento", "data_previsao"],
    accounting_date: &[
        "data_emissao",
        "data_pagamento",
        "data_registro",
        "data_vencimento",
    ],
    settlement_date: &["data_pagamento"],
    name: &[
        "numero_documento",
        "numero_documento_fiscal",
        "numero_pedido",
    ],
    note: &["observacao", "numero_documento"],
    counterparty: &[
        "nome_cliente_fornecedor",
        "nome_fantasia_cliente_fornecedor",
        "razao_social_cliente_fornecedor",
    ],
    category: &["categoria", "codigo_categoria"],
    status: &["status_titulo", "status"],
    installment: &["numero_parcela"],
    installment_count: &["quantidade_parcela"],
    payment_method: &["nome_forma_pagamento", "tipo_documento"],
    default_name: "Movimentação OMIE",
};

const BOMCONTROLE: FieldMap = FieldMap {
    id: &["IdMovimentacaoFinanceiraParcela"],
    due_date: &["DataVencimento"],
    accounting_date: &["DataCompetencia", "DataVencimento"],
    settlement_date: &["DataQuitacao"],
    name: &["Nome"],
    note: &["Observacao"],
    counterparty: &[
        "NomeClienteFornecedor",
        "NomeFantasiaClienteFornecedor",
        "RazaoSocialClienteFornecedor",
    ],
    category: &["NomeCategoriaFinanceira"],
    status: &["Status"],
    installment: &["NumeroParcela"],
    installment_count: &["QuantidadeParcela"],
    payment_method: &["NomeFormaPagamento"],
    default_name: "",
};

const OMIE_CATEGORY_FALLBACK: &str = "Sem categoria";

/// Maps one upstream record into a [`Movement`]. Never fails.
#[must_use]
pub fn normalize(source: UpstreamSource, record: &Value) -> Movement {
    let fields = Fields::new(record);
    let movement = match source {
        UpstreamSource::Omie => normalize_omie(fields),
        UpstreamSource::BomControle => normalize_bomcontrole(fields),
    };

    if movement.amount.is_zero() {
        debug!(source = %source, id = %movement.id, "Movement without amount, defaulting to zero");
    }
    if movement.due_date.is_none() {
        debug!(source = %source, id = %movement.id, "Movement without due date");
    }
    movement
}

/// Maps a batch of upstream records.
#[must_use]
pub fn normalize_all(source: UpstreamSource, records: &[Value]) -> Vec<Movement> {
    records.iter().map(|r| normalize(source, r)).collect()
}

/// Fields shared by every source once the table is applied.
fn base(fields: Fields<'_>, map: &FieldMap) -> Movement {
    let name = fields.text(map.name);
    let (installment_number, parsed_count) = split_installment(&fields.text(map.installment));

    Movement {
        id: fields.text(map.id),
        is_debit: false,
        due_date: fields.date(map.due_date),
        accounting_date: fields.date(map.accounting_date),
        settlement_date: fields.date(map.settlement_date),
        amount: Decimal::ZERO,
        name: if name.is_empty() {
            map.default_name.to_string()
        } else {
            name
        },
        note: fields.text(map.note),
        counterparty: fields.text(map.counterparty),
        category: fields.text(map.category),
        status: fields.text(map.status),
        installment_number,
        installment_count: fields.unsigned(map.installment_count).or(parsed_count),
        payment_method: fields.text(map.payment_method),
        settled: false,
    }
}

fn normalize_omie(fields: Fields<'_>) -> Movement {
    let mut movement = base(fields, &OMIE);
    let details = fields.nested("_detalhes");

    movement.is_debit = fields.flag("debito").unwrap_or_else(|| {
        fields.text(&["tipo"]).eq_ignore_ascii_case("DESPESA")
            || fields.text(&["natureza"]).eq_ignore_ascii_case("P")
    });

    let liquidated = fields.flag("liquidado").unwrap_or(false);
    let title_value = details.decimal(&["nValorTitulo"]);
    let primary = if liquidated {
        fields.decimal(&["valor_liquido", "valor_pago", "valor_documento"])
    } else {
        fields.decimal(&["valor_documento", "valor_aberto"])
    };
    let mut amount = primary.or(title_value).unwrap_or(Decimal::ZERO);
    if amount.is_zero() {
        amount = fields
            .decimal(&["valor_liquido", "valor_pago", "valor_aberto"])
            .or(title_value)
            .unwrap_or(Decimal::ZERO);
    }
    movement.amount = amount;

    if let Some(first) = fields.array("categorias").first() {
        let code = Fields::new(first).text(&["cCodCateg", "codigo_categoria"]);
        if !code.is_empty() {
            movement.category = code;
        }
    }
    if movement.category.is_empty() {
        movement.category = OMIE_CATEGORY_FALLBACK.to_string();
    }

    if movement.installment_number.is_empty() {
        let raw = [
            details.text(&["cNumParcela"]),
            fields
                .nested("_movimento_completo")
                .nested("detalhes")
                .text(&["cNumParcela"]),
        ]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default();
        let (number, count) = split_installment(&raw);
        movement.installment_number = number;
        movement.installment_count = movement.installment_count.or(count);
    }

    if movement.status.is_empty() {
        movement.status = details.text(&["cStatus"]);
    }

    movement.settled = is_settled(&movement, fields);
    movement
}

fn normalize_bomcontrole(fields: Fields<'_>) -> Movement {
    let mut movement = base(fields, &BOMCONTROLE);

    movement.is_debit = fields.flag("Debito").unwrap_or(false);
    movement.amount = fields.decimal(&["Valor"]).unwrap_or(Decimal::ZERO);

    if let Some(first) = fields.array("Valores").first() {
        let root = Fields::new(first).text(&["NomeCategoriaRoot"]);
        if !root.is_empty() {
            movement.category = root;
        }
    }

    movement.settled = is_settled(&movement, fields);
    movement
}

/// Whether a title counts as paid.
///
/// A settlement date wins; then the status text; then any recorded
/// write-offs (`baixas` / `pagamentos`).
fn is_settled(movement: &Movement, fields: Fields<'_>) -> bool {
    if movement.settlement_date.is_some() {
        return true;
    }

    let status = movement.status.to_uppercase();
    if ["PAGO", "BAIXADO", "QUITADO"]
        .iter()
        .any(|s| status.contains(s))
    {
        return true;
    }
    if ["ATRASADO", "VENCE HOJE", "A VENCER", "PENDENTE"]
        .iter()
        .any(|s| status.contains(s))
    {
        return false;
    }

    !fields.array("baixas").is_empty() || !fields.array("pagamentos").is_empty()
}

/// Splits `"004/013"` into `("4", Some(13))`; anything else is kept as is.
fn split_installment(raw: &str) -> (String, Option<u32>) {
    match raw.split_once('/') {
        Some((number, count)) => {
            let number = number.trim();
            let label = number
                .parse::<u32>()
                .map_or_else(|_| number.to_string(), |n| n.to_string());
            (label, count.trim().parse().ok().filter(|c| *c > 0))
        }
        None => (raw.to_string(), None),
    }
}
