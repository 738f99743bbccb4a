use chrono::Datelike as _;

use crate::entities::{
    DreGroup, DreGroup as G, DreMetric, DreReport, DreRoute, DreRow, LedgerEntry, MonthlyValues,
};

const fn route(group: DreGroup, line: &'static str) -> DreRoute {
    DreRoute { group, line }
}

/// Category value -> report line. Categories missing here do not appear in
/// the report.
static ROUTES: &[(&str, DreRoute)] = &[
    // Receitas operacionais.
    ("venda_produtos", route(G::OperatingRevenue, "Venda de produtos")),
    ("venda_servicos", route(G::OperatingRevenue, "Venda de serviços")),
    ("outras_receitas_operacionais", route(G::OperatingRevenue, "Outras receitas operacionais")),
    // Custos e despesas diretas.
    ("custo_mercadorias_vendidas", route(G::OperatingExpense, "Custo de mercadorias vendidas")),
    ("custo_servicos_prestados", route(G::OperatingExpense, "Custo dos serviços prestados")),
    ("impostos_sobre_vendas", route(G::OperatingExpense, "Impostos sobre vendas")),
    ("logistica_vendas", route(G::OperatingExpense, "Logística de vendas")),
    ("taxas_sobre_vendas", route(G::OperatingExpense, "Taxas sobre vendas")),
    ("outras_despesas_diretas", route(G::OperatingExpense, "Outras despesas diretas")),
    // Vendas e marketing.
    ("marketing_publicidade", route(G::SalesMarketingExpense, "Marketing e publicidade")),
    ("descontos_comerciais", route(G::SalesMarketingExpense, "Descontos comerciais e promoções")),
    ("comissoes_vendas", route(G::SalesMarketingExpense, "Comissões sobre vendas")),
    ("brindes_promocionais", route(G::SalesMarketingExpense, "Brindes promocionais")),
    ("publicidade_anuncios", route(G::SalesMarketingExpense, "Publicidade e anúncios")),
    ("eventos_patrocinios", route(G::SalesMarketingExpense, "Eventos e patrocínios")),
    ("viagens_deslocamentos", route(G::SalesMarketingExpense, "Viagens e deslocamentos")),
    ("pesquisa_mercado", route(G::SalesMarketingExpense, "Pesquisa de mercado")),
    (
        "outras_despesas_venda_marketing",
        route(G::SalesMarketingExpense, "Outras despesas de venda e marketing"),
    ),
    // Administrativas.
    ("agua_esgoto", route(G::AdministrativeExpense, "Água e esgoto")),
    ("alugueis_condominio", route(G::AdministrativeExpense, "Aluguéis, condomínios e IPTU")),
    ("servicos_contabilidade", route(G::AdministrativeExpense, "Serviços de contabilidade")),
    ("assessorias_consultorias", route(G::AdministrativeExpense, "Assessorias e consultorias")),
    ("servicos_juridicos", route(G::AdministrativeExpense, "Serviços jurídicos")),
    ("documentacao_registros", route(G::AdministrativeExpense, "Documentação e registros")),
    ("energia_eletrica", route(G::AdministrativeExpense, "Energia elétrica")),
    ("entidades_associacoes", route(G::AdministrativeExpense, "Entidades e associações")),
    ("lanches_refeicoes", route(G::AdministrativeExpense, "Lanches e refeições")),
    ("limpeza_conservacao", route(G::AdministrativeExpense, "Limpeza e conservação")),
    ("manutencao_equipamentos", route(G::AdministrativeExpense, "Manutenção de equipamentos")),
    ("material_escritorio", route(G::AdministrativeExpense, "Material de escritório")),
    ("servicos_terceirizados", route(G::AdministrativeExpense, "Serviços terceirizados")),
    ("seguranca_patrimonial", route(G::AdministrativeExpense, "Segurança patrimonial")),
    ("software_ferramentas", route(G::AdministrativeExpense, "Software e ferramentas digitais")),
    ("taxas_licencas", route(G::AdministrativeExpense, "Taxas e licenças")),
    ("telefonia_internet", route(G::AdministrativeExpense, "Telefonia e internet")),
    ("transporte_combustiveis", route(G::AdministrativeExpense, "Transporte e combustíveis")),
    (
        "outras_despesas_administrativas",
        route(G::AdministrativeExpense, "Outras despesas administrativas"),
    ),
    // Pessoal.
    ("salarios_ordenados", route(G::PayrollExpense, "Salários e ordenados")),
    ("pro_labore", route(G::PayrollExpense, "Pró-labore")),
    ("ferias_beneficios", route(G::PayrollExpense, "Férias e benefícios")),
    ("encargos_trabalhistas", route(G::PayrollExpense, "Encargos trabalhistas")),
    ("cursos_treinamentos", route(G::PayrollExpense, "Cursos e treinamentos")),
    ("recrutamento_selecao", route(G::PayrollExpense, "Recrutamento e seleção")),
    ("outras_despesas_pessoal", route(G::PayrollExpense, "Outras despesas com pessoal")),
    // Receitas financeiras.
    ("emprestimos_captados", route(G::FinancialRevenue, "Empréstimos captados")),
    ("receita_aplicacoes", route(G::FinancialRevenue, "Receita de aplicações financeiras")),
    ("aportes_capital", route(G::FinancialRevenue, "Aportes de capital")),
    ("multas_juros_recebidos", route(G::FinancialRevenue, "Multas e juros recebidos")),
    ("descontos_obtidos", route(G::FinancialRevenue, "Descontos obtidos")),
    ("transferencia_interna_entrada", route(G::FinancialRevenue, "Receitas financeiras")),
    ("outras_receitas_financeiras", route(G::FinancialRevenue, "Outras receitas financeiras")),
    // Outras receitas.
    ("reembolso_despesas", route(G::OtherRevenue, "Reembolso de despesas")),
    ("venda_ativos", route(G::OtherRevenue, "Venda de ativos imobilizados")),
    ("outras_receitas_diversas", route(G::OtherRevenue, "Outras receitas diversas")),
    // Despesas financeiras.
    ("multas_juros_pagos", route(G::FinancialExpense, "Multas e juros pagos")),
    ("descontos_concedidos", route(G::FinancialExpense, "Descontos concedidos")),
    ("tarifas_bancarias", route(G::FinancialExpense, "Tarifas bancárias")),
    ("transferencia_interna_saida", route(G::FinancialExpense, "Despesas financeiras")),
    ("faturas_cartao_credito", route(G::FinancialExpense, "Despesas financeiras")),
    ("outras_despesas_financeiras", route(G::FinancialExpense, "Outras despesas financeiras")),
    // Investimentos.
    ("amortizacao_emprestimos", route(G::Investments, "Amortização de empréstimos")),
    ("aquisicao_tecnologias", route(G::Investments, "Aquisição de tecnologias")),
    ("pesquisa_desenvolvimento", route(G::Investments, "Pesquisa e desenvolvimento")),
    ("moveis_utensilios", route(G::Investments, "Móveis e utensílios")),
    ("obras_reformas", route(G::Investments, "Obras, reformas e benfeitorias")),
    ("aquisicao_ativos", route(G::Investments, "Aquisição de ativos")),
    ("outros_investimentos", route(G::Investments, "Outros investimentos")),
    // Impostos sobre o lucro.
    ("csll", route(G::IncomeTaxes, "CSLL")),
    ("irpj", route(G::IncomeTaxes, "IRPJ")),
];

/// Printed layout of the report. Sublines listed here are the ones shown when
/// a group is expanded; a routed line missing from its group's list (the
/// hidden transfer categories) still counts towards the group total.
pub(crate) static LAYOUT: &[DreRow] = &[
    DreRow::Group {
        group: DreGroup::OperatingRevenue,
        title: "Receitas operacionais",
        lines: &["Venda de produtos", "Venda de serviços", "Outras receitas operacionais"],
    },
    DreRow::Group {
        group: DreGroup::OperatingExpense,
        title: "Despesas operacionais",
        lines: &[
            "Custo de mercadorias vendidas",
            "Custo dos serviços prestados",
            "Impostos sobre vendas",
            "Logística de vendas",
            "Taxas sobre vendas",
            "Outras despesas diretas",
        ],
    },
    DreRow::Group {
        group: DreGroup::SalesMarketingExpense,
        title: "Despesas de vendas e marketing",
        lines: &[
            "Marketing e publicidade",
            "Descontos comerciais e promoções",
            "Comissões sobre vendas",
            "Brindes promocionais",
            "Publicidade e anúncios",
            "Eventos e patrocínios",
            "Viagens e deslocamentos",
            "Pesquisa de mercado",
            "Outras despesas de venda e marketing",
        ],
    },
    DreRow::Metric {
        metric: DreMetric::ContributionMargin,
        title: "Margem de contribuição",
    },
    DreRow::Group {
        group: DreGroup::AdministrativeExpense,
        title: "Despesas administrativas",
        lines: &[
            "Água e esgoto",
            "Aluguéis, condomínios e IPTU",
            "Serviços de contabilidade",
            "Assessorias e consultorias",
            "Serviços jurídicos",
            "Documentação e registros",
            "Energia elétrica",
            "Entidades e associações",
            "Lanches e refeições",
            "Limpeza e conservação",
            "Manutenção de equipamentos",
            "Material de escritório",
            "Serviços terceirizados",
            "Segurança patrimonial",
            "Software e ferramentas digitais",
            "Taxas e licenças",
            "Telefonia e internet",
            "Transporte e combustíveis",
            "Outras despesas administrativas",
        ],
    },
    DreRow::Group {
        group: DreGroup::PayrollExpense,
        title: "Despesas com pessoal",
        lines: &[
            "Salários e ordenados",
            "Pró-labore",
            "Férias e benefícios",
            "Encargos trabalhistas",
            "Cursos e treinamentos",
            "Recrutamento e seleção",
            "Outras despesas com pessoal",
        ],
    },
    DreRow::Metric {
        metric: DreMetric::Ebitda,
        title: "EBITDA",
    },
    DreRow::Group {
        group: DreGroup::FinancialRevenue,
        title: "Receitas financeiras",
        lines: &[
            "Empréstimos captados",
            "Receita de aplicações financeiras",
            "Aportes de capital",
            "Multas e juros recebidos",
            "Descontos obtidos",
            "Outras receitas financeiras",
        ],
    },
    DreRow::Group {
        group: DreGroup::OtherRevenue,
        title: "Outras receitas",
        lines: &[
            "Reembolso de despesas",
            "Venda de ativos imobilizados",
            "Outras receitas diversas",
        ],
    },
    DreRow::Group {
        group: DreGroup::FinancialExpense,
        title: "Despesas financeiras",
        lines: &[
            "Multas e juros pagos",
            "Descontos concedidos",
            "Tarifas bancárias",
            "Outras despesas financeiras",
        ],
    },
    DreRow::Group {
        group: DreGroup::Investments,
        title: "Investimentos",
        lines: &[
            "Amortização de empréstimos",
            "Aquisição de tecnologias",
            "Pesquisa e desenvolvimento",
            "Móveis e utensílios",
            "Obras, reformas e benfeitorias",
            "Aquisição de ativos",
            "Outros investimentos",
        ],
    },
    DreRow::Group {
        group: DreGroup::IncomeTaxes,
        title: "Impostos sobre o lucro",
        lines: &["CSLL", "IRPJ"],
    },
    DreRow::Metric {
        metric: DreMetric::NetProfit,
        title: "Lucro líquido",
    },
];

pub(crate) fn route_for(category: &str) -> Option<DreRoute> {
    ROUTES
        .iter()
        .find(|(value, _)| *value == category)
        .map(|(_, route)| *route)
}

/// Builds the monthly income statement of one year from the raw ledger.
pub(crate) struct DreAggregator {
    year: i32,
}

impl DreAggregator {
    pub(crate) fn new(year: i32) -> Self {
        Self { year }
    }

    pub(crate) fn aggregate(&self, entries: &[LedgerEntry]) -> DreReport {
        let mut report = DreReport {
            year: self.year,
            lines: Default::default(),
            groups: Default::default(),
            metrics: Default::default(),
            unmapped_entries: 0,
            invalid_dates: 0,
        };

        for entry in entries {
            let Some(due) = entry.due() else {
                report.invalid_dates += 1;
                continue;
            };
            if due.year() != self.year {
                continue;
            }
            let Some(route) = route_for(&entry.category) else {
                report.unmapped_entries += 1;
                continue;
            };

            // Classification comes from the category, not from the stored
            // sign: revenue is always positive and expenses always negative.
            let value = if route.group.is_expense() {
                -entry.amount.abs()
            } else {
                entry.amount.abs()
            };
            let month = due.month0() as usize;
            report.lines.entry(route.line).or_insert([0.0; 12])[month] += value;
            report.groups.entry(route.group).or_insert([0.0; 12])[month] += value;
        }

        for metric in DreMetric::ALL {
            report.metrics.insert(metric, [0.0; 12]);
        }
        for month in 0..12 {
            let g = |group: DreGroup| report.group(group)[month];

            let margin = g(DreGroup::OperatingRevenue)
                + g(DreGroup::OperatingExpense)
                + g(DreGroup::SalesMarketingExpense);
            let ebitda = margin + g(DreGroup::AdministrativeExpense) + g(DreGroup::PayrollExpense);
            let net_profit = ebitda
                + g(DreGroup::FinancialRevenue)
                + g(DreGroup::OtherRevenue)
                + g(DreGroup::FinancialExpense)
                + g(DreGroup::Investments)
                + g(DreGroup::IncomeTaxes);

            set_month(&mut report, DreMetric::ContributionMargin, month, margin);
            set_month(&mut report, DreMetric::Ebitda, month, ebitda);
            set_month(&mut report, DreMetric::NetProfit, month, net_profit);
        }

        report
    }
}

fn set_month(report: &mut DreReport, metric: DreMetric, month: usize, value: f64) {
    if let Some(values) = report.metrics.get_mut(&metric) {
        values[month] = value;
    }
}

pub(crate) fn total(values: &MonthlyValues) -> f64 {
    values.iter().sum()
}
