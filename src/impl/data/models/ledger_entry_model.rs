use serde_derive::{Deserialize, Serialize};

use crate::entities::{EntryId, EntryKind, EntryStatus, Frequency, LedgerEntry};

/// Stored representation of a lançamento. Field names follow the JSON the
/// web client writes to local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LedgerEntryModel {
    id: String,
    tipo: EntryKindModel,
    descricao: String,
    vencimento: String,
    valor: f64,
    status: EntryStatusModel,
    categoria: String,
    contato: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parcela: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    numero_parcelas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frequencia: Option<FrequencyModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dia_repeticao: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    conclusao_automatica: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    apenas_dias_uteis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    atrasado: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKindModel {
    Entrada,
    Saida,
    Recorrente,
    Parcelado,
    /// Older clients wrote "padrao" for one-off entries; the sign of the
    /// amount tells the direction.
    Padrao,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EntryStatusModel {
    EmAberto,
    Concluido,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FrequencyModel {
    Mensal,
    Semanal,
    Quinzenal,
    Trimestral,
    #[serde(other)]
    Unknown,
}

impl From<LedgerEntryModel> for LedgerEntry {
    fn from(m: LedgerEntryModel) -> Self {
        let kind = match m.tipo {
            EntryKindModel::Entrada => EntryKind::Incoming,
            EntryKindModel::Saida => EntryKind::Outgoing,
            EntryKindModel::Recorrente => EntryKind::Recurring,
            EntryKindModel::Parcelado => EntryKind::Installment,
            EntryKindModel::Padrao if m.valor < 0.0 => EntryKind::Outgoing,
            EntryKindModel::Padrao => EntryKind::Incoming,
        };
        LedgerEntry {
            id: EntryId(m.id),
            kind,
            description: m.descricao,
            due_date: m.vencimento,
            amount: m.valor,
            status: match m.status {
                EntryStatusModel::EmAberto => EntryStatus::Open,
                EntryStatusModel::Concluido => EntryStatus::Completed,
            },
            category: m.categoria,
            contact: m.contato,
            installment: m.parcela,
            installment_count: m.numero_parcelas,
            frequency: m.frequencia.and_then(|f| match f {
                FrequencyModel::Mensal => Some(Frequency::Monthly),
                FrequencyModel::Semanal => Some(Frequency::Weekly),
                FrequencyModel::Quinzenal => Some(Frequency::Biweekly),
                FrequencyModel::Trimestral => Some(Frequency::Quarterly),
                FrequencyModel::Unknown => None,
            }),
            repeat_day: m.dia_repeticao,
            auto_complete: m.conclusao_automatica,
            business_days_only: m.apenas_dias_uteis,
            overdue: m.atrasado,
        }
    }
}

impl From<&LedgerEntry> for LedgerEntryModel {
    fn from(e: &LedgerEntry) -> Self {
        LedgerEntryModel {
            id: e.id.0.clone(),
            tipo: match e.kind {
                EntryKind::Incoming => EntryKindModel::Entrada,
                EntryKind::Outgoing => EntryKindModel::Saida,
                EntryKind::Recurring => EntryKindModel::Recorrente,
                EntryKind::Installment => EntryKindModel::Parcelado,
            },
            descricao: e.description.clone(),
            vencimento: e.due_date.clone(),
            valor: e.amount,
            status: match e.status {
                EntryStatus::Open => EntryStatusModel::EmAberto,
                EntryStatus::Completed => EntryStatusModel::Concluido,
            },
            categoria: e.category.clone(),
            contato: e.contact.clone(),
            parcela: e.installment.clone(),
            numero_parcelas: e.installment_count,
            frequencia: e.frequency.map(|f| match f {
                Frequency::Monthly => FrequencyModel::Mensal,
                Frequency::Weekly => FrequencyModel::Semanal,
                Frequency::Biweekly => FrequencyModel::Quinzenal,
                Frequency::Quarterly => FrequencyModel::Trimestral,
            }),
            dia_repeticao: e.repeat_day,
            conclusao_automatica: e.auto_complete,
            apenas_dias_uteis: e.business_days_only,
            atrasado: e.overdue,
        }
    }
}
