use std::sync::LazyLock;

use fractic_server_error::ServerError;
use regex::Regex;

use crate::{
    entities::{Category, CategoryOption, CustomCategory, Direction},
    errors::InvalidCategoryValue,
};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static NOT_VALUE_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").expect("value charset regex"));

struct StaticCategory {
    value: &'static str,
    label: &'static str,
    subcategories: &'static [(&'static str, &'static str)],
}

static OUTFLOW_CATEGORIES: &[StaticCategory] = &[
    StaticCategory {
        value: "custos_despesas_diretas",
        label: "Custos e despesas diretas",
        subcategories: &[
            ("custo_mercadorias_vendidas", "Custo de mercadorias vendidas"),
            ("custo_servicos_prestados", "Custo dos serviços prestados"),
            ("impostos_sobre_vendas", "Impostos sobre vendas"),
            ("logistica_vendas", "Logística de vendas"),
            ("taxas_sobre_vendas", "Taxas sobre vendas"),
            ("outras_despesas_diretas", "Outras despesas diretas"),
        ],
    },
    StaticCategory {
        value: "despesas_venda_marketing",
        label: "Despesas de venda e marketing",
        subcategories: &[
            ("marketing_publicidade", "Marketing e publicidade"),
            ("descontos_comerciais", "Descontos comerciais e promoções"),
            ("comissoes_vendas", "Comissões sobre vendas"),
            ("brindes_promocionais", "Brindes promocionais"),
            ("publicidade_anuncios", "Publicidade e anúncios"),
            ("eventos_patrocinios", "Eventos e patrocínios"),
            ("viagens_deslocamentos", "Viagens e deslocamentos"),
            ("pesquisa_mercado", "Pesquisa de mercado"),
            ("outras_despesas_venda_marketing", "Outras despesas de venda e marketing"),
        ],
    },
    StaticCategory {
        value: "despesas_administrativas",
        label: "Despesas administrativas",
        subcategories: &[
            ("agua_esgoto", "Água e esgoto"),
            ("alugueis_condominio", "Aluguéis, condomínios e IPTU"),
            ("servicos_contabilidade", "Serviços de contabilidade"),
            ("assessorias_consultorias", "Assessorias e consultorias"),
            ("servicos_juridicos", "Serviços jurídicos"),
            ("documentacao_registros", "Documentação e registros"),
            ("energia_eletrica", "Energia elétrica"),
            ("entidades_associacoes", "Entidades e associações"),
            ("lanches_refeicoes", "Lanches e refeições"),
            ("limpeza_conservacao", "Limpeza e conservação"),
            ("manutencao_equipamentos", "Manutenção de equipamentos"),
            ("material_escritorio", "Material de escritório"),
            ("servicos_terceirizados", "Serviços terceirizados"),
            ("seguranca_patrimonial", "Segurança patrimonial"),
            ("software_ferramentas", "Software e ferramentas digitais"),
            ("taxas_licencas", "Taxas e licenças"),
            ("telefonia_internet", "Telefonia e internet"),
            ("transporte_combustiveis", "Transporte e combustíveis"),
            ("outras_despesas_administrativas", "Outras despesas administrativas"),
        ],
    },
    StaticCategory {
        value: "despesas_pessoal",
        label: "Despesas de pessoal",
        subcategories: &[
            ("salarios_ordenados", "Salários e ordenados"),
            ("pro_labore", "Pró-labore"),
            ("ferias_beneficios", "Férias e benefícios"),
            ("encargos_trabalhistas", "Encargos trabalhistas"),
            ("cursos_treinamentos", "Cursos e treinamentos"),
            ("recrutamento_selecao", "Recrutamento e seleção"),
            ("outras_despesas_pessoal", "Outras despesas com pessoal"),
        ],
    },
    StaticCategory {
        value: "despesas_financeiras",
        label: "Despesas financeiras",
        subcategories: &[
            ("multas_juros_pagos", "Multas e juros pagos"),
            ("descontos_concedidos", "Descontos concedidos"),
            ("tarifas_bancarias", "Tarifas bancárias"),
            ("transferencia_interna_saida", "Transferência interna de saída (Oculta)"),
            ("faturas_cartao_credito", "Faturas de cartão de crédito (Oculta)"),
            ("outras_despesas_financeiras", "Outras despesas financeiras"),
        ],
    },
    StaticCategory {
        value: "investimentos",
        label: "Investimentos",
        subcategories: &[
            ("amortizacao_emprestimos", "Amortização de empréstimos"),
            ("aquisicao_tecnologias", "Aquisição de tecnologias"),
            ("pesquisa_desenvolvimento", "Pesquisa e desenvolvimento"),
            ("moveis_utensilios", "Móveis e utensílios"),
            ("obras_reformas", "Obras, reformas e benfeitorias"),
            ("aquisicao_ativos", "Aquisição de ativos"),
            ("outros_investimentos", "Outros investimentos"),
        ],
    },
    StaticCategory {
        value: "impostos_lucro",
        label: "Impostos sobre o lucro",
        subcategories: &[("csll", "CSLL"), ("irpj", "IRPJ")],
    },
];

static INFLOW_CATEGORIES: &[StaticCategory] = &[
    StaticCategory {
        value: "receitas_operacionais",
        label: "Receitas operacionais",
        subcategories: &[
            ("venda_produtos", "Venda de produtos"),
            ("venda_servicos", "Venda de serviços"),
            ("outras_receitas_operacionais", "Outras receitas operacionais"),
        ],
    },
    StaticCategory {
        value: "receitas_financeiras",
        label: "Receitas financeiras",
        subcategories: &[
            ("emprestimos_captados", "Empréstimos captados"),
            ("receita_aplicacoes", "Receita de aplicações financeiras"),
            ("aportes_capital", "Aportes de capital"),
            ("multas_juros_recebidos", "Multas e juros recebidos"),
            ("descontos_obtidos", "Descontos obtidos"),
            ("transferencia_interna_entrada", "Transferência interna de entrada (Oculta)"),
            ("outras_receitas_financeiras", "Outras receitas financeiras"),
        ],
    },
    StaticCategory {
        value: "outras_receitas",
        label: "Outras receitas",
        subcategories: &[
            ("reembolso_despesas", "Reembolso de despesas"),
            ("venda_ativos", "Venda de ativos imobilizados"),
            ("outras_receitas_diversas", "Outras receitas diversas"),
        ],
    },
];

/// Contact keys offered by the filter form.
static FILTER_CONTACTS: &[(&str, &str)] = &[
    ("cliente-x", "Cliente X"),
    ("fornecedor-y", "Fornecedor Y"),
    ("nao-identificado", "Não identificado"),
];

/// Contact keys offered by the creation form.
static FORM_CONTACTS: &[(&str, &str)] = &[
    ("cliente_x", "Cliente X"),
    ("fornecedor_y", "Fornecedor Y"),
    ("prestador_z", "Prestador Z"),
    ("nao-identificado", "Não identificado"),
];

pub const UNIDENTIFIED_CONTACT: &str = "Não identificado";

fn static_table(direction: Direction) -> &'static [StaticCategory] {
    match direction {
        Direction::Inflow => INFLOW_CATEGORIES,
        Direction::Outflow => OUTFLOW_CATEGORIES,
    }
}

/// The built-in taxonomy for one direction.
pub fn base_categories(direction: Direction) -> Vec<Category> {
    static_table(direction)
        .iter()
        .map(|c| Category {
            value: c.value.to_string(),
            label: c.label.to_string(),
            subcategories: c
                .subcategories
                .iter()
                .map(|(value, label)| Category::leaf(*value, *label))
                .collect(),
        })
        .collect()
}

/// Label of a built-in category, falling back to the raw value.
pub fn category_label(value: &str, direction: Direction) -> String {
    for c in static_table(direction) {
        if c.subcategories.is_empty() {
            if c.value == value {
                return c.label.to_string();
            }
        } else if let Some((_, label)) = c.subcategories.iter().find(|(v, _)| *v == value) {
            return label.to_string();
        }
    }
    value.to_string()
}

/// Like [`category_label`], but also resolves custom categories.
pub fn category_label_with_custom(
    value: &str,
    direction: Direction,
    customs: &[CustomCategory],
) -> String {
    customs
        .iter()
        .find(|c| c.direction == direction && c.value == value)
        .map(|c| c.label.clone())
        .unwrap_or_else(|| category_label(value, direction))
}

/// Built-in taxonomy merged with the user's custom categories.
///
/// Custom categories nested under a parent whose value matches a built-in
/// group are appended to that group's subcategories; custom root categories
/// are appended at the end, each with its own custom children.
pub fn categories_with_custom(direction: Direction, customs: &[CustomCategory]) -> Vec<Category> {
    let customs: Vec<&CustomCategory> = customs.iter().filter(|c| c.direction == direction).collect();

    let merged = base_categories(direction).into_iter().map(|mut base| {
        base.subcategories.extend(
            customs
                .iter()
                .filter(|c| parent_value(c, &customs) == Some(base.value.as_str()))
                .map(|c| Category::leaf(c.value.clone(), c.label.clone())),
        );
        base
    });

    let custom_roots = customs
        .iter()
        .filter(|c| c.parent_category.is_none())
        .map(|root| Category {
            value: root.value.clone(),
            label: root.label.clone(),
            subcategories: customs
                .iter()
                .filter(|sub| sub.parent_category.as_ref() == Some(&root.id))
                .map(|sub| Category::leaf(sub.value.clone(), sub.label.clone()))
                .collect(),
        });

    merged.chain(custom_roots).collect()
}

fn parent_value<'a>(c: &CustomCategory, customs: &[&'a CustomCategory]) -> Option<&'a str> {
    let parent_id = c.parent_category.as_ref()?;
    customs
        .iter()
        .find(|p| &p.id == parent_id)
        .map(|p| p.value.as_str())
}

/// Flat list of every selectable leaf: built-in subcategories first, then
/// every custom category.
pub fn all_subcategories(direction: Direction, customs: &[CustomCategory]) -> Vec<CategoryOption> {
    let base = static_table(direction).iter().flat_map(|c| {
        c.subcategories.iter().map(|(value, label)| CategoryOption {
            value: value.to_string(),
            label: label.to_string(),
            is_custom: false,
        })
    });
    let custom = customs
        .iter()
        .filter(|c| c.direction == direction)
        .map(|c| CategoryOption {
            value: c.value.clone(),
            label: c.label.clone(),
            is_custom: true,
        });
    base.chain(custom).collect()
}

/// Display name for a filter-form contact key. Unknown keys are returned
/// unchanged, so a raw contact name also works as a filter.
pub fn contact_label<'a>(key: &'a str, aliases: &'a [(String, String)]) -> &'a str {
    FILTER_CONTACTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .or_else(|| {
            aliases
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, label)| label.as_str())
        })
        .unwrap_or(key)
}

/// Display name for a creation-form contact key.
pub fn form_contact_label(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return UNIDENTIFIED_CONTACT.to_string();
    }
    FORM_CONTACTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Turns a typed category name into a storage value: lowercase, whitespace
/// runs become `_`, anything outside `[a-z0-9_]` is dropped.
pub fn normalize_category_value(raw: &str) -> Result<String, ServerError> {
    let lower = raw.trim().to_lowercase();
    let underscored = WHITESPACE.replace_all(&lower, "_");
    let value = NOT_VALUE_CHAR.replace_all(&underscored, "").into_owned();
    if value.is_empty() {
        return Err(InvalidCategoryValue::new(raw));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CategoryId;

    fn custom(id: &str, value: &str, parent: Option<&str>) -> CustomCategory {
        CustomCategory {
            id: CategoryId::new(id),
            value: value.to_string(),
            label: value.to_uppercase(),
            direction: Direction::Outflow,
            parent_category: parent.map(CategoryId::new),
            is_custom: true,
        }
    }

    #[test]
    fn label_falls_back_to_raw_value() {
        assert_eq!(
            category_label("software_ferramentas", Direction::Outflow),
            "Software e ferramentas digitais"
        );
        assert_eq!(category_label("venda_servicos", Direction::Inflow), "Venda de serviços");
        assert_eq!(category_label("software_ferramentas", Direction::Inflow), "software_ferramentas");
        assert_eq!(category_label("unknown", Direction::Outflow), "unknown");
    }

    #[test]
    fn custom_roots_are_appended_with_their_children() {
        let customs = vec![
            custom("c1", "saas", None),
            custom("c2", "saas_infra", Some("c1")),
            custom("c3", "saas_apps", Some("c1")),
        ];
        let merged = categories_with_custom(Direction::Outflow, &customs);
        assert_eq!(merged.len(), OUTFLOW_CATEGORIES.len() + 1);
        let root = merged.last().unwrap();
        assert_eq!(root.value, "saas");
        let children: Vec<&str> = root.subcategories.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(children, vec!["saas_infra", "saas_apps"]);
    }

    #[test]
    fn custom_children_of_a_base_named_parent_are_merged_into_the_base_group() {
        let customs = vec![
            custom("c1", "despesas_pessoal", None),
            custom("c2", "bonus_anual", Some("c1")),
        ];
        let merged = categories_with_custom(Direction::Outflow, &customs);
        let payroll = merged.iter().find(|c| c.value == "despesas_pessoal").unwrap();
        assert_eq!(payroll.subcategories.last().unwrap().value, "bonus_anual");
    }

    #[test]
    fn custom_categories_of_the_other_direction_are_ignored() {
        let customs = vec![custom("c1", "saas", None)];
        let merged = categories_with_custom(Direction::Inflow, &customs);
        assert_eq!(merged.len(), INFLOW_CATEGORIES.len());
        assert!(all_subcategories(Direction::Inflow, &customs).iter().all(|c| !c.is_custom));
    }

    #[test]
    fn flat_list_puts_custom_entries_last() {
        let customs = vec![custom("c1", "saas", None)];
        let options = all_subcategories(Direction::Outflow, &customs);
        let last = options.last().unwrap();
        assert_eq!(last.value, "saas");
        assert!(last.is_custom);
        assert!(options.iter().any(|c| c.value == "csll" && !c.is_custom));
    }

    #[test]
    fn category_values_are_normalized() {
        assert_eq!(normalize_category_value("  Infra Cloud ").unwrap(), "infra_cloud");
        assert_eq!(normalize_category_value("SaaS  B2B-2025").unwrap(), "saas_b2b2025");
        // Accented letters are dropped, not transliterated.
        assert_eq!(normalize_category_value("Serviços").unwrap(), "servios");
        assert!(normalize_category_value("!!!").is_err());
        assert!(normalize_category_value("   ").is_err());
    }

    #[test]
    fn contact_mappings() {
        assert_eq!(contact_label("cliente-x", &[]), "Cliente X");
        assert_eq!(contact_label("AWS", &[]), "AWS");
        let aliases = vec![("aws".to_string(), "AWS".to_string())];
        assert_eq!(contact_label("aws", &aliases), "AWS");
        assert_eq!(form_contact_label("prestador_z"), "Prestador Z");
        assert_eq!(form_contact_label(""), UNIDENTIFIED_CONTACT);
        assert_eq!(form_contact_label("Banco"), "Banco");
    }
}
