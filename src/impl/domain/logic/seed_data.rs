use crate::entities::{EntryId, EntryKind, EntryStatus, LedgerEntry};

use super::utils::days_in_month;

/// Bumped whenever the generated data changes, so stored copies get reseeded.
pub const SEED_VERSION: &str = "2025.3";

pub(crate) const SEED_YEAR: i32 = 2025;

const CLIENTS: [&str; 10] = [
    "TechCorp",
    "StartupXYZ",
    "EmpresaABC",
    "InovaçãoBR",
    "DigitalPlus",
    "CloudSys",
    "DataFlow",
    "NextGen",
    "SmartSol",
    "FutureTech",
];

const MORE_CLIENTS: [&str; 10] = [
    "InnovativeTech",
    "GlobalSolutions",
    "TechLeaders",
    "DigitalMinds",
    "FutureSystems",
    "SmartStart",
    "GlobalInnovations",
    "TechVision",
    "InnovativeSolutions",
    "DigitalLeaders",
];

const PLANS: [(&str, f64); 4] = [
    ("Starter", 490.0),
    ("Pro", 1490.0),
    ("Business", 2990.0),
    ("Enterprise", 4990.0),
];

const SOFTWARE: [(&str, f64); 5] = [
    ("Google Workspace", 120.0),
    ("Figma", 75.0),
    ("GitHub", 45.0),
    ("Notion", 120.0),
    ("Slack", 95.0),
];

const PARTNERSHIPS: [&str; 2] = ["Revendas", "Integrações"];

/// Summary of a seed used to detect stale stored copies:
/// `"<count>-<rounded sum of absolute amounts>"`.
pub fn seed_hash(entries: &[LedgerEntry]) -> String {
    let total: f64 = entries.iter().map(|e| e.amount.abs()).sum();
    format!("{}-{}", entries.len(), total.round() as i64)
}

/// Mock ledger of a growing SaaS company over the seed year: subscription
/// revenue, services, operating costs, payroll, financial movements,
/// investments and income taxes.
pub fn seed_entries() -> Vec<LedgerEntry> {
    let mut seed = SeedBuilder::default();
    for month in 1..=12 {
        seed.revenue(month);
        if month == 1 {
            seed.first_month_revenue();
        }
        seed.operating_expenses(month);
        seed.administrative_expenses(month);
        seed.payroll(month);
        seed.financial(month);
        seed.investments_and_taxes(month);
    }
    seed.entries
}

#[derive(Default)]
struct SeedBuilder {
    entries: Vec<LedgerEntry>,
    counter: u32,
}

impl SeedBuilder {
    /// Appends a completed entry. Days past the end of the month are moved to
    /// its last day.
    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        prefix: String,
        kind: EntryKind,
        description: String,
        day: u32,
        month: u32,
        amount: f64,
        category: &str,
        contact: &str,
    ) -> &mut LedgerEntry {
        self.counter += 1;
        let day = day.min(days_in_month(SEED_YEAR, month).unwrap_or(28));
        let mut entry = LedgerEntry::new(
            "",
            kind,
            description,
            format!("{:02}/{:02}/{}", day, month, SEED_YEAR),
            amount,
            EntryStatus::Completed,
            category,
            contact,
        );
        entry.id = EntryId(format!("{}-{:03}", prefix, self.counter));
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    fn revenue(&mut self, month: u32) {
        use EntryKind::{Incoming, Recurring};
        let m = month as f64;

        // Subscriptions; customers move up one plan from June.
        for (idx, client) in CLIENTS[..8].iter().chain(&MORE_CLIENTS[..4]).enumerate() {
            let plan = if month >= 6 {
                (idx % PLANS.len() + 1).min(PLANS.len() - 1)
            } else {
                idx % PLANS.len()
            };
            let (name, price) = PLANS[plan];
            self.push(
                format!("rec-{}", month),
                Recurring,
                format!("MRR - {} (Plano {})", client, name),
                5,
                month,
                price,
                "venda_servicos",
                client,
            );
        }
        if month >= 2 {
            let plan = if month >= 6 {
                3
            } else if month >= 4 {
                2
            } else {
                1
            };
            let (name, price) = PLANS[plan];
            for i in 0..6 {
                let client = MORE_CLIENTS[(month as usize * 2 + i) % MORE_CLIENTS.len()];
                self.push(
                    format!("rec2-{}-{}", month, i),
                    Recurring,
                    format!("MRR - {} (Plano {})", client, name),
                    6 + i as u32,
                    month,
                    price,
                    "venda_servicos",
                    client,
                );
            }
        }

        // New customers.
        let new_customers = if month <= 6 { 5 } else { 4 };
        for i in 0..new_customers {
            let client = MORE_CLIENTS[(month as usize * new_customers + i) % MORE_CLIENTS.len()];
            let plan = if month >= 6 {
                (i % PLANS.len() + 1).min(PLANS.len() - 1)
            } else {
                i % PLANS.len()
            };
            let (name, price) = PLANS[plan];
            self.push(
                format!("nov-{}", month),
                Incoming,
                format!("Onboarding - {} (Plano {})", client, name),
                8 + i as u32 * 4,
                month,
                price,
                "venda_servicos",
                client,
            );
        }

        // Upgrades.
        if month % 2 == 0 || month % 3 == 0 {
            let idx = month as usize % (CLIENTS.len() + MORE_CLIENTS.len());
            let client = CLIENTS.iter().chain(&MORE_CLIENTS).nth(idx).copied().unwrap_or(CLIENTS[0]);
            self.push(
                format!("upg-{}", month),
                Incoming,
                format!("Upgrade de plano - {}", client),
                12,
                month,
                1200.0 + m * 150.0,
                "venda_servicos",
                client,
            );
        }
        if month >= 2 {
            for i in 0..3 {
                let client = CLIENTS[(month as usize + i) % CLIENTS.len()];
                self.push(
                    format!("upg2-{}-{}", month, i),
                    Incoming,
                    format!("Upgrade de plano - {}", client),
                    10 + i as u32 * 3,
                    month,
                    1500.0 + m * 200.0 + i as f64 * 300.0,
                    "venda_servicos",
                    client,
                );
            }
        }

        // Services.
        for i in 0..2 {
            let client = CLIENTS[(month as usize + i) % CLIENTS.len()];
            self.push(
                format!("svc-{}-{}", month, i),
                Incoming,
                format!("Serviço adicional - Consultoria {} ({}h)", client, 8 + i * 4),
                15 + i as u32 * 5,
                month,
                1500.0 + m * 100.0 + i as f64 * 500.0,
                "venda_servicos",
                client,
            );
        }
        if month >= 2 {
            for i in 0..4 {
                let client = MORE_CLIENTS[(month as usize + i) % MORE_CLIENTS.len()];
                self.push(
                    format!("svc-prem-{}-{}", month, i),
                    Incoming,
                    format!("Serviço premium - Consultoria estratégica {} ({}h)", client, 12 + i * 4),
                    14 + i as u32 * 4,
                    month,
                    3500.0 + m * 250.0 + i as f64 * 800.0,
                    "venda_servicos",
                    client,
                );
            }
        }

        // Training.
        if month % 2 == 0 {
            let client = CLIENTS[month as usize % CLIENTS.len()];
            self.push(
                format!("trn-{}", month),
                Incoming,
                format!("Treinamento especializado - {}", client),
                22,
                month,
                3500.0 + m * 200.0,
                "venda_servicos",
                client,
            );
        }
        if month >= 2 {
            for i in 0..2 {
                let client = MORE_CLIENTS[(month as usize + i * 2) % MORE_CLIENTS.len()];
                self.push(
                    format!("trn-corp-{}-{}", month, i),
                    Incoming,
                    format!("Treinamento corporativo - {}", client),
                    18 + i as u32 * 5,
                    month,
                    5500.0 + m * 300.0 + i as f64 * 1000.0,
                    "venda_servicos",
                    client,
                );
            }
        }

        // Products.
        if month % 3 == 0 {
            self.push(
                format!("prod-{}", month),
                Incoming,
                "Venda de produto adicional - Licenças Enterprise".to_string(),
                18,
                month,
                8000.0 + m * 1000.0,
                "venda_produtos",
                "Vendas Diretas",
            );
        }
        if month >= 2 {
            for i in 0..3 {
                let client = MORE_CLIENTS[(month as usize + i) % MORE_CLIENTS.len()];
                self.push(
                    format!("prod-mensal-{}-{}", month, i),
                    Incoming,
                    format!("Venda de licenças adicionais - Cliente {}", client),
                    16 + i as u32 * 4,
                    month,
                    4500.0 + m * 400.0 + i as f64 * 1500.0,
                    "venda_produtos",
                    client,
                );
            }
        }

        // Partnerships.
        if month >= 3 {
            self.push(
                format!("parc-{}", month),
                Incoming,
                "Comissões de parcerias estratégicas".to_string(),
                25,
                month,
                2500.0 + m * 300.0,
                "outras_receitas_operacionais",
                "Parceiros",
            );
        }
        if month >= 2 {
            for (i, partnership) in PARTNERSHIPS.iter().enumerate() {
                self.push(
                    format!("parc2-{}-{}", month, i),
                    Incoming,
                    format!("Receita de parcerias - {}", partnership),
                    23 + i as u32 * 2,
                    month,
                    4000.0 + m * 500.0 + i as f64 * 2000.0,
                    "outras_receitas_operacionais",
                    "Parceiros Estratégicos",
                );
            }
        }

        // Support contracts and implementation projects.
        if month >= 2 {
            for i in 0..5 {
                let client = MORE_CLIENTS[(month as usize + i) % MORE_CLIENTS.len()];
                self.push(
                    format!("sup-prem-{}-{}", month, i),
                    Incoming,
                    format!("Suporte premium - {}", client),
                    5 + i as u32 * 5,
                    month,
                    2200.0 + m * 200.0 + i as f64 * 500.0,
                    "venda_servicos",
                    client,
                );
            }
            for i in 0..2 {
                let client = CLIENTS[(month as usize + i) % CLIENTS.len()];
                self.push(
                    format!("impl-{}-{}", month, i),
                    Incoming,
                    format!("Implementação projeto - {}", client),
                    11 + i as u32 * 7,
                    month,
                    8500.0 + m * 600.0 + i as f64 * 3000.0,
                    "venda_servicos",
                    client,
                );
            }
        }
    }

    /// January has no recurring contracts yet; these one-offs keep it
    /// profitable.
    fn first_month_revenue(&mut self) {
        use EntryKind::Incoming;

        for i in 0..5 {
            let client = MORE_CLIENTS[i % MORE_CLIENTS.len()];
            self.push(
                format!("sup-init-{}", i),
                Incoming,
                format!("Suporte premium - {}", client),
                7 + i as u32 * 5,
                1,
                2400.0 + i as f64 * 500.0,
                "venda_servicos",
                client,
            );
        }
        for i in 0..2 {
            let client = CLIENTS[i];
            self.push(
                format!("impl-init-{}", i),
                Incoming,
                format!("Implementação projeto - {}", client),
                15 + i as u32 * 7,
                1,
                9000.0 + i as f64 * 3000.0,
                "venda_servicos",
                client,
            );
        }
        for i in 0..4 {
            let client = MORE_CLIENTS[i];
            self.push(
                format!("svc-init-{}", i),
                Incoming,
                format!("Serviço premium - Consultoria estratégica {}", client),
                12 + i as u32 * 4,
                1,
                3750.0 + i as f64 * 800.0,
                "venda_servicos",
                client,
            );
        }
        for i in 0..2 {
            let client = MORE_CLIENTS[i];
            self.push(
                format!("trn-init-{}", i),
                Incoming,
                format!("Treinamento corporativo - {}", client),
                20 + i as u32 * 5,
                1,
                5800.0 + i as f64 * 1000.0,
                "venda_servicos",
                client,
            );
        }
        for i in 0..3 {
            let client = MORE_CLIENTS[i];
            self.push(
                format!("prod-init-{}", i),
                Incoming,
                format!("Venda de licenças adicionais - Cliente {}", client),
                18 + i as u32 * 4,
                1,
                4900.0 + i as f64 * 1500.0,
                "venda_produtos",
                client,
            );
        }
        for (i, partnership) in PARTNERSHIPS.iter().enumerate() {
            self.push(
                format!("parc-init-{}", i),
                Incoming,
                format!("Receita de parcerias - {}", partnership),
                25 + i as u32 * 2,
                1,
                4500.0 + i as f64 * 2000.0,
                "outras_receitas_operacionais",
                "Parceiros Estratégicos",
            );
        }
        for i in 0..3 {
            let client = CLIENTS[i];
            self.push(
                format!("upg-init-{}", i),
                Incoming,
                format!("Upgrade de plano - {}", client),
                10 + i as u32 * 3,
                1,
                1700.0 + i as f64 * 300.0,
                "venda_servicos",
                client,
            );
        }
    }

    fn operating_expenses(&mut self, month: u32) {
        use EntryKind::{Outgoing, Recurring};
        let m = month as f64;
        let previous = if month == 1 { 12 } else { month - 1 };

        // Cost of services.
        self.push(
            format!("cst-{}", month),
            Outgoing,
            format!("AWS - EC2/RDS/S3 (competência {}/25)", previous),
            7,
            month,
            -(1800.0 + m * 150.0),
            "custo_servicos_prestados",
            "AWS",
        );
        self.push(
            format!("cdn-{}", month),
            Recurring,
            "Cloudflare - CDN e WAF".to_string(),
            8,
            month,
            -210.0,
            "custo_servicos_prestados",
            "Cloudflare",
        );
        self.push(
            format!("eml-{}", month),
            Recurring,
            "SendGrid - E-mails transacionais".to_string(),
            9,
            month,
            -(120.0 + m * 10.0),
            "custo_servicos_prestados",
            "SendGrid",
        );
        self.push(
            format!("imp-{}", month),
            Outgoing,
            format!("Impostos sobre vendas (competência {}/25)", previous),
            20,
            month,
            -(3500.0 + m * 200.0),
            "impostos_sobre_vendas",
            "SEFAZ",
        );
        self.push(
            format!("tax-{}", month),
            Outgoing,
            format!("Taxas do gateway ({}/25)", month),
            6,
            month,
            -(400.0 + m * 30.0),
            "taxas_sobre_vendas",
            "Gateway Pagamentos",
        );
        if month % 2 == 1 {
            self.push(
                format!("dsc-{}", month),
                Outgoing,
                format!("Descontos promocionais - Campanha {}/25", month),
                12,
                month,
                -(200.0 + m * 20.0),
                "descontos_comerciais",
                "Campanha",
            );
        }

        // Sales and marketing.
        self.push(
            format!("mkt-{}", month),
            Outgoing,
            "Meta Ads".to_string(),
            9,
            month,
            -(3000.0 + m * 100.0),
            "marketing_publicidade",
            "Meta",
        );
        self.push(
            format!("gad-{}", month),
            Outgoing,
            "Google Ads".to_string(),
            16,
            month,
            -(3800.0 + m * 150.0),
            "publicidade_anuncios",
            "Google",
        );
        self.push(
            format!("com-{}", month),
            Outgoing,
            "Comissões SDR".to_string(),
            28,
            month,
            -(2000.0 + m * 100.0),
            "comissoes_vendas",
            "Equipe Comercial",
        );
        if month % 3 == 0 {
            self.push(
                format!("evt-{}", month),
                Outgoing,
                format!("Evento SaaS Week - {}/25", month),
                15,
                month,
                -5000.0,
                "eventos_patrocinios",
                "Organizador Evento",
            );
        }
        if month % 4 == 0 {
            self.push(
                format!("bri-{}", month),
                Outgoing,
                "Brindes promocionais".to_string(),
                18,
                month,
                -(600.0 + m * 50.0),
                "brindes_promocionais",
                "Fornecedor Brindes",
            );
        }
    }

    fn administrative_expenses(&mut self, month: u32) {
        use EntryKind::{Outgoing, Recurring};
        let m = month as f64;
        // December bills are still open.
        let end_of_year_status = if month == 12 {
            EntryStatus::Open
        } else {
            EntryStatus::Completed
        };

        for (idx, (name, price)) in SOFTWARE.iter().enumerate() {
            let contact = name.split(' ').next().unwrap_or(name);
            self.push(
                format!("sw-{}-{}", month, idx),
                Recurring,
                name.to_string(),
                1 + idx as u32,
                month,
                -price,
                "software_ferramentas",
                contact,
            );
        }
        self.push(
            format!("cnt-{}", month),
            Outgoing,
            "Contabilidade - Honorários".to_string(),
            10,
            month,
            -650.0,
            "servicos_contabilidade",
            "Escritório Contábil",
        );
        self.push(
            format!("alg-{}", month),
            Outgoing,
            format!("Aluguel escritório ({}/25)", month),
            5,
            month,
            -3500.0,
            "alugueis_condominio",
            "Imobiliária",
        )
        .status = end_of_year_status;
        self.push(
            format!("tel-{}", month),
            Recurring,
            "Internet escritório".to_string(),
            11,
            month,
            -199.9,
            "telefonia_internet",
            "Operadora",
        );
        self.push(
            format!("eng-{}", month),
            Outgoing,
            "Energia elétrica escritório".to_string(),
            18,
            month,
            -(450.0 + m * 10.0),
            "energia_eletrica",
            "Concessionária",
        );
        self.push(
            format!("lmp-{}", month),
            Recurring,
            "Limpeza e conservação".to_string(),
            30,
            month,
            -380.0,
            "limpeza_conservacao",
            "Prestador Limpeza",
        )
        .status = end_of_year_status;
    }

    fn payroll(&mut self, month: u32) {
        use EntryKind::Outgoing;
        let m = month as f64;

        self.push(
            format!("sal-{}", month),
            Outgoing,
            "Folha - Salários".to_string(),
            5,
            month,
            -(25000.0 + m * 500.0),
            "salarios_ordenados",
            "Equipe",
        );
        self.push(
            format!("plb-{}", month),
            Outgoing,
            "Pró-labore sócios".to_string(),
            5,
            month,
            -8000.0,
            "pro_labore",
            "Diretoria",
        );
        self.push(
            format!("enc-{}", month),
            Outgoing,
            "Encargos trabalhistas (GPS/FGTS)".to_string(),
            7,
            month,
            -(7000.0 + m * 200.0),
            "encargos_trabalhistas",
            "Gov",
        );
        if month == 6 || month == 12 {
            self.push(
                format!("fer-{}", month),
                Outgoing,
                "Férias e benefícios".to_string(),
                15,
                month,
                -12000.0,
                "ferias_beneficios",
                "Equipe",
            );
        }
        if month % 2 == 0 {
            self.push(
                format!("cur-{}", month),
                Outgoing,
                "Cursos e treinamentos".to_string(),
                20,
                month,
                -(1500.0 + m * 100.0),
                "cursos_treinamentos",
                "Plataforma Treinamento",
            );
        }
    }

    fn financial(&mut self, month: u32) {
        use EntryKind::{Incoming, Outgoing};
        let m = month as f64;

        let yield_status = if month == 12 {
            EntryStatus::Open
        } else {
            EntryStatus::Completed
        };
        self.push(
            format!("rfin-{}", month),
            Incoming,
            "Receita aplicações financeiras".to_string(),
            30,
            month,
            800.0 + m * 150.0,
            "receita_aplicacoes",
            "Banco",
        )
        .status = yield_status;
        if month % 3 == 1 && month <= 9 {
            self.push(
                format!("apt-{}", month),
                Incoming,
                format!("Aporte de capital - Rodada {}", month / 3 + 1),
                1,
                month,
                100000.0 + m * 5000.0,
                "aportes_capital",
                "Investidores",
            );
        }
        self.push(
            format!("jrs-rec-{}", month),
            Incoming,
            "Juros e rendimentos de aplicações".to_string(),
            28,
            month,
            if month == 1 { 1400.0 } else { 1200.0 + m * 200.0 },
            "outras_receitas_financeiras",
            "Banco",
        );
        self.push(
            format!("remb-{}", month),
            Incoming,
            "Reembolso de despesas e ajustes".to_string(),
            27,
            month,
            if month == 1 { 1750.0 } else { 1500.0 + m * 250.0 },
            "reembolso_despesas",
            "Fornecedores",
        );

        self.push(
            format!("tbf-{}", month),
            Outgoing,
            "Tarifas bancárias".to_string(),
            14,
            month,
            -145.9,
            "tarifas_bancarias",
            "Banco",
        );
        if month % 2 == 0 {
            self.push(
                format!("jrs-{}", month),
                Outgoing,
                "Juros antecipação de recebíveis".to_string(),
                21,
                month,
                -(300.0 + m * 10.0),
                "outras_despesas_financeiras",
                "Banco",
            );
        }
    }

    fn investments_and_taxes(&mut self, month: u32) {
        use EntryKind::Outgoing;
        let m = month as f64;

        if month % 3 == 0 {
            self.push(
                format!("inv-{}", month),
                Outgoing,
                "Aquisição de tecnologias".to_string(),
                25,
                month,
                -(5000.0 + m * 500.0),
                "aquisicao_tecnologias",
                "Fornecedor TI",
            );
        }
        if month % 2 == 1 {
            self.push(
                format!("pd-{}", month),
                Outgoing,
                "Pesquisa e desenvolvimento".to_string(),
                19,
                month,
                -(3000.0 + m * 200.0),
                "pesquisa_desenvolvimento",
                "Fornecedor IA",
            );
        }

        // CSLL and IRPJ over the previous month's estimated profit.
        if month > 1 {
            let estimated_profit = if month <= 3 {
                30000.0 + m * 5000.0
            } else if month <= 6 {
                50000.0 + m * 3000.0
            } else {
                80000.0 + m * 4000.0
            };
            self.push(
                format!("csll-{}", month),
                Outgoing,
                format!("CSLL (competência {}/25)", month - 1),
                20,
                month,
                -(estimated_profit * 0.09),
                "csll",
                "SEFAZ",
            );
            self.push(
                format!("irpj-{}", month),
                Outgoing,
                format!("IRPJ (competência {}/25)", month - 1),
                20,
                month,
                -(estimated_profit * 0.15),
                "irpj",
                "SEFAZ",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Datelike as _;

    use super::*;

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(seed_entries(), seed_entries());
        assert_eq!(seed_hash(&seed_entries()), seed_hash(&seed_entries()));
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let entries = seed_entries();
        let ids: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), entries.len());
        assert_eq!(entries[0].id.as_str(), "rec-1-001");
        assert_eq!(entries[1].id.as_str(), "rec-1-002");
    }

    #[test]
    fn every_due_date_is_a_valid_day_of_the_seed_year() {
        for entry in seed_entries() {
            let due = entry.due().unwrap_or_else(|| panic!("{} has bad date", entry.id));
            assert_eq!(due.year(), SEED_YEAR);
        }
        // The 30th is moved to the end of February.
        let february_cleaning = seed_entries()
            .into_iter()
            .find(|e| e.description == "Limpeza e conservação" && e.due_date.ends_with("/02/2025"))
            .unwrap();
        assert_eq!(february_cleaning.due_date, "28/02/2025");
    }

    #[test]
    fn amount_sign_agrees_with_kind() {
        for entry in seed_entries() {
            match entry.kind {
                EntryKind::Incoming => assert!(entry.amount > 0.0, "{}", entry.id),
                EntryKind::Outgoing => assert!(entry.amount < 0.0, "{}", entry.id),
                _ => {}
            }
        }
    }

    #[test]
    fn december_bills_are_open() {
        let entries = seed_entries();
        let open: Vec<&str> = entries
            .iter()
            .filter(|e| e.status == EntryStatus::Open)
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(open.len(), 3);
        assert!(open.contains(&"Aluguel escritório (12/25)"));
    }

    #[test]
    fn hash_counts_entries_and_rounds_absolute_total() {
        let entries = vec![
            LedgerEntry::new("a", EntryKind::Incoming, "", "", 10.4, EntryStatus::Open, "", ""),
            LedgerEntry::new("b", EntryKind::Outgoing, "", "", -5.3, EntryStatus::Open, "", ""),
        ];
        assert_eq!(seed_hash(&entries), "2-16");
        assert_eq!(seed_hash(&[]), "0-0");
    }
}
