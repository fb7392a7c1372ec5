use chrono::{Local, NaiveDate};
use clap::Args;
use funding_diagnosis::balance_import::{BalanceSheetImporter, ImportedBalances};
use funding_diagnosis::config::AppConfig;
use funding_diagnosis::diagnosis::{
    ChecklistBlock, CompanyProfile, CriterionResult, Diagnosis, DiagnosisReport, FormData, Rating,
};
use funding_diagnosis::error::AppError;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Questionnaire answers as a JSON document
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Balance-sheet CSV export that replaces both balance years of the questionnaire
    #[arg(long)]
    pub(crate) balance_csv: Option<PathBuf>,
    /// Reference date for elapsed-month rules (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Lender rating between A1 and C3 (defaults to APP_DEFAULT_RATING)
    #[arg(long)]
    pub(crate) rating: Option<Rating>,
    /// without_history or with_history (defaults to APP_DEFAULT_PROFILE)
    #[arg(long)]
    pub(crate) profile: Option<CompanyProfile>,
    /// Capital override for the financing calculator
    #[arg(long)]
    pub(crate) capital: Option<f64>,
    /// Print the report as JSON instead of a checklist
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportBalanceArgs {
    /// Balance-sheet CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the imported balances as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let DiagnoseArgs {
        input,
        balance_csv,
        today,
        rating,
        profile,
        capital,
        json,
    } = args;

    let config = AppConfig::load()?;
    let request = config.diagnosis.financing_request(rating, profile, capital);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let (form, imported) = load_form(&input, balance_csv.as_deref())?;
    let report = Diagnosis::run(&form, &request, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report, imported.as_ref());
    }

    Ok(())
}

pub(crate) fn run_import_balance(args: ImportBalanceArgs) -> Result<(), AppError> {
    let imported = BalanceSheetImporter::from_path(&args.csv)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&imported)?);
    } else {
        render_imported(&imported);
    }

    Ok(())
}

pub(crate) fn load_form(
    input: &Path,
    balance_csv: Option<&Path>,
) -> Result<(FormData, Option<ImportedBalances>), AppError> {
    let file = File::open(input)?;
    let form: FormData = serde_json::from_reader(BufReader::new(file))?;

    match balance_csv {
        Some(path) => {
            let imported = BalanceSheetImporter::from_path(path)?;
            let form = form.with_balances(imported.year_minus_1, imported.year_minus_2);
            Ok((form, Some(imported)))
        }
        None => Ok((form, None)),
    }
}

fn render_report(report: &DiagnosisReport, imported: Option<&ImportedBalances>) {
    println!("Public funding self-diagnosis");
    println!("Evaluated on {}", report.evaluated_on);
    if let Some(imported) = imported {
        println!(
            "Balance years imported from CSV ({} rows, {} line items)",
            imported.matched,
            imported.fields.len()
        );
    }

    let aggregates = &report.aggregates;
    println!("\nKey figures");
    println!(
        "- Net equity: {:.2} (year -1) | {:.2} (year -2)",
        aggregates.net_equity_minus_1, aggregates.net_equity_minus_2
    );
    println!("- Runway: {:.2} months", aggregates.runway_months);
    println!(
        "- Half-capital test (year -1): {}",
        aggregates.directive_minus_1.label()
    );
    println!(
        "- Lender solvency: {} (year -1) | {} (year -2)",
        aggregates.lender_minus_1.label(),
        aggregates.lender_minus_2.label()
    );

    for block in report.checklists() {
        render_block(block);
    }

    let financing = &report.financing;
    println!("\nVenture-debt financing");
    println!(
        "- Rating {} / {} on capital {:.2}{}",
        financing.rating,
        financing.profile,
        financing.capital,
        if financing.capital_overridden {
            " (override)"
        } else {
            ""
        }
    );
    if financing.forced_to_zero {
        println!("- Maximum amount: 0 (venture-debt requirements not met)");
    } else {
        println!("- Maximum amount: {}", financing.amount);
    }

    let eligible = report.eligible_programs();
    if eligible.is_empty() {
        println!("\nEligible programs: none");
    } else {
        println!("\nEligible programs: {}", eligible.join(", "));
    }

    println!("\n{}", report.disclaimer);
}

fn render_block(block: &ChecklistBlock) {
    println!("\n{}", block.title);
    for criterion in &block.criteria {
        render_criterion(criterion);
    }
    if let Some(conclusion) = &block.conclusion {
        render_criterion(conclusion);
    }
}

fn render_criterion(criterion: &CriterionResult) {
    println!(
        "  [{:<5}] {}: {}",
        criterion.kind.label(),
        criterion.label,
        criterion.status
    );
}

fn render_imported(imported: &ImportedBalances) {
    println!("Balance-sheet import");
    println!("Matched rows: {}", imported.matched);
    if imported.fields.is_empty() {
        return;
    }

    println!("\n{:<28} {:>16} {:>16}", "Line item", "Year -1", "Year -2");
    for field in &imported.fields {
        println!(
            "{:<28} {:>16.2} {:>16.2}",
            field.label(),
            imported.year_minus_1.get(*field),
            imported.year_minus_2.get(*field)
        );
    }
}
