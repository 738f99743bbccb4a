use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fractic_server_error::ServerError;
use strive_ledger::{
    entities::{
        CategoryId, CustomCategoryPatch, Direction, DreExpandState, EntryDraft, EntryId, EntryMode,
        ExportFormat, Frequency, LedgerQuery, NewCustomCategory, Sort, SortColumn, SortDirection,
    },
    errors::WriteError,
    util::StriveUtil,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "strive", version, about = "Lançamentos financeiros e DRE")]
struct Cli {
    /// RON config file; missing file means defaults.
    #[arg(long, default_value = "strive.ron")]
    config: PathBuf,

    /// Overrides `data_dir` from the config file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Overrides `log_json` from the config file.
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List entries, optionally filtered by a list URL query string.
    List {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Show one entry.
    Show { id: String },
    /// Export the filtered list.
    Export {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFmt,
        /// Defaults to the generated file name in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a new entry.
    Create(CreateArgs),
    /// Manage custom categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    },
    /// Monthly income statement.
    Dre {
        /// Defaults to the configured fiscal year.
        #[arg(long)]
        year: Option<i32>,
        /// Row title to expand; repeatable.
        #[arg(long)]
        expand: Vec<String>,
        #[arg(long)]
        expand_all: bool,
    },
    /// Totals of the filtered list.
    Summary {
        #[command(flatten)]
        query: QueryArgs,
    },
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    Logout,
    Whoami,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// e.g. "dir=saidas&cat=software_ferramentas&from=01-03-2025&to=31-03-2025"
    #[arg(long, default_value = "")]
    query: String,
    #[arg(long, value_enum)]
    sort: Option<SortBy>,
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long, value_enum)]
    direction: Dir,
    #[arg(long, value_enum, default_value = "padrao")]
    mode: Mode,
    #[arg(long)]
    description: String,
    /// pt-BR notation, e.g. "1.234,56".
    #[arg(long)]
    amount: String,
    #[arg(long)]
    category: String,
    /// DD/MM/YYYY; defaults to today.
    #[arg(long, value_parser = parse_due_date)]
    due: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    contact: String,
    #[arg(long)]
    completed: bool,
    #[arg(long, default_value_t = 1)]
    installments: u32,
    #[arg(long, value_enum, default_value = "mensal")]
    frequency: Freq,
    #[arg(long, default_value_t = 24)]
    repeat_day: u32,
    #[arg(long)]
    auto_complete: bool,
    #[arg(long)]
    business_days_only: bool,
}

#[derive(Subcommand, Debug)]
enum CategoriesCommand {
    /// Built-in taxonomy merged with custom categories.
    List {
        #[arg(long, value_enum)]
        direction: Dir,
    },
    Add {
        #[arg(long, value_enum)]
        direction: Dir,
        #[arg(long)]
        label: String,
        /// Derived from the label when omitted.
        #[arg(long)]
        value: Option<String>,
        /// Id of the parent custom category.
        #[arg(long)]
        parent: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        value: Option<String>,
        #[arg(long, value_enum)]
        direction: Option<Dir>,
        #[arg(long, conflicts_with = "no_parent")]
        parent: Option<String>,
        #[arg(long)]
        no_parent: bool,
    },
    Remove { id: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Dir {
    Entrada,
    Saida,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    Padrao,
    Parcelado,
    Recorrente,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Freq {
    Mensal,
    Semanal,
    Quinzenal,
    Trimestral,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SortBy {
    Vencimento,
    Valor,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ExportFmt {
    Csv,
    Excel,
}

impl From<Dir> for Direction {
    fn from(d: Dir) -> Self {
        match d {
            Dir::Entrada => Direction::Inflow,
            Dir::Saida => Direction::Outflow,
        }
    }
}

impl From<Freq> for Frequency {
    fn from(f: Freq) -> Self {
        match f {
            Freq::Mensal => Frequency::Monthly,
            Freq::Semanal => Frequency::Weekly,
            Freq::Quinzenal => Frequency::Biweekly,
            Freq::Trimestral => Frequency::Quarterly,
        }
    }
}

impl QueryArgs {
    fn to_query(&self) -> Result<LedgerQuery, ServerError> {
        let mut query = StriveUtil::decode_query(&self.query)?;
        query.sort = self.sort.map(|by| Sort {
            column: match by {
                SortBy::Vencimento => SortColumn::DueDate,
                SortBy::Valor => SortColumn::Amount,
            },
            direction: if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
        });
        Ok(query)
    }
}

impl From<CreateArgs> for EntryDraft {
    fn from(a: CreateArgs) -> Self {
        EntryDraft {
            direction: a.direction.into(),
            mode: match a.mode {
                Mode::Padrao => EntryMode::Standard,
                Mode::Parcelado => EntryMode::Installment,
                Mode::Recorrente => EntryMode::Recurring,
            },
            description: a.description,
            due_date: a.due,
            amount: a.amount,
            contact: a.contact,
            category: a.category,
            completed: a.completed,
            installment_count: a.installments,
            frequency: a.frequency.into(),
            repeat_day: a.repeat_day,
            auto_complete: a.auto_complete,
            business_days_only: a.business_days_only,
        }
    }
}

fn parse_due_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y").map_err(|e| format!("expected DD/MM/YYYY: {}", e))
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let util = match StriveUtil::from_config_file(&cli.config).await {
        Ok(util) => util,
        Err(e) => {
            init_tracing(cli.log_json);
            error!(error = ?e, "failed to load config");
            std::process::exit(1);
        }
    };
    init_tracing(cli.log_json || util.config().log_json);

    let util = match &cli.data_dir {
        Some(dir) => {
            let mut config = util.config().clone();
            config.data_dir = dir.clone();
            StriveUtil::open(config)
        }
        None => util,
    };

    if let Err(e) = run(&util, cli.command).await {
        error!(error = ?e, "command failed");
        std::process::exit(1);
    }
}

async fn run(util: &StriveUtil, command: Command) -> Result<(), ServerError> {
    match command {
        Command::List { query } => {
            let view = util.list(&query.to_query()?).await?;
            print!("{}", util.print_list(&view).await?);
        }
        Command::Show { id } => match util.find(&EntryId::new(id.clone())).await? {
            Some(entry) => print!("{}", util.print_details(&entry).await?),
            None => println!("Lançamento '{}' não encontrado.", id),
        },
        Command::Export {
            query,
            format,
            output,
        } => {
            let format = match format {
                ExportFmt::Csv => ExportFormat::Csv,
                ExportFmt::Excel => ExportFormat::Excel,
            };
            let file = util.export(&query.to_query()?, format).await?;
            // The generated name embeds dd/mm/yyyy dates.
            let path = output.unwrap_or_else(|| PathBuf::from(file.file_name.replace('/', "-")));
            tokio::fs::write(&path, file.content.as_bytes())
                .await
                .map_err(|e| WriteError::with_debug(&path.to_string_lossy(), &e))?;
            info!(path = %path.display(), mime_type = file.mime_type, "export written");
        }
        Command::Create(args) => {
            let entry = util.create(&args.into()).await?;
            print!("{}", util.print_details(&entry).await?);
        }
        Command::Categories { command } => categories(util, command).await?,
        Command::Dre {
            year,
            expand,
            expand_all,
        } => {
            let year = year.unwrap_or(util.config().fiscal_year);
            let report = util.dre(year).await?;
            let mut state = if expand_all {
                DreExpandState::all_expanded()
            } else {
                DreExpandState::default()
            };
            for title in &expand {
                if !state.is_expanded(title) {
                    state.toggle(title);
                }
            }
            print!("{}", util.print_dre(&report, &state));
        }
        Command::Summary { query } => {
            let summary = util.summary(&query.to_query()?).await?;
            print!("{}", util.print_summary(&summary));
        }
        Command::Login { email } => {
            util.login(email.as_deref()).await?;
            if let Some(email) = util.current_user().await? {
                println!("Conectado como {}.", email);
            }
        }
        Command::Logout => {
            util.logout().await?;
            println!("Sessão encerrada.");
        }
        Command::Whoami => match util.current_user().await? {
            Some(email) => println!("{}", email),
            None => println!("Nenhuma sessão ativa."),
        },
    }
    Ok(())
}

async fn categories(util: &StriveUtil, command: CategoriesCommand) -> Result<(), ServerError> {
    match command {
        CategoriesCommand::List { direction } => {
            let customs = util.custom_categories().await?;
            for group in util.categories(direction.into()).await? {
                println!("{} ({})", group.label, group.value);
                for sub in &group.subcategories {
                    let id = customs
                        .iter()
                        .find(|c| c.value == sub.value && c.direction == Direction::from(direction))
                        .map(|c| format!("  [{}]", c.id))
                        .unwrap_or_default();
                    println!("  - {} ({}){}", sub.label, sub.value, id);
                }
            }
        }
        CategoriesCommand::Add {
            direction,
            label,
            value,
            parent,
        } => {
            let created = util
                .add_category(NewCustomCategory {
                    value: value.unwrap_or_else(|| label.clone()),
                    label,
                    direction: direction.into(),
                    parent_category: parent.map(CategoryId::new),
                })
                .await?;
            println!("{} ({}) [{}]", created.label, created.value, created.id);
        }
        CategoriesCommand::Update {
            id,
            label,
            value,
            direction,
            parent,
            no_parent,
        } => {
            let parent_category = if no_parent {
                Some(None)
            } else {
                parent.map(|p| Some(CategoryId::new(p)))
            };
            let updated = util
                .update_category(
                    &CategoryId::new(id),
                    CustomCategoryPatch {
                        value,
                        label,
                        direction: direction.map(Into::into),
                        parent_category,
                    },
                )
                .await?;
            println!("{} ({}) [{}]", updated.label, updated.value, updated.id);
        }
        CategoriesCommand::Remove { id } => {
            util.remove_category(&CategoryId::new(id)).await?;
            println!("Categoria removida.");
        }
    }
    Ok(())
}
