use crate::infra::{load_roster, sample_roster, InMemoryStudentRoster};
use chrono::{Local, NaiveDate};
use clap::Args;
use fleet_fees::config::{AppConfig, FeeConfig};
use fleet_fees::error::AppError;
use fleet_fees::workflows::fees::{
    BillingPeriod, CalculationRequest, EvaluationResult, FeeRecord, FeeService, FeeSummary,
    Payment, PaymentMethod, StudentFeeSummary,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Annual family income
    #[arg(long)]
    pub(crate) income: f64,
    /// Academic score percentage (0-100)
    #[arg(long)]
    pub(crate) academic_score: f64,
    /// Attendance percentage (0-100)
    #[arg(long)]
    pub(crate) attendance: f64,
    /// A sibling is already enrolled on the bus service
    #[arg(long)]
    pub(crate) sibling: bool,
    /// Single parent household
    #[arg(long)]
    pub(crate) single_parent: bool,
    /// Student holds a recognised sports achievement
    #[arg(long)]
    pub(crate) sports: bool,
    /// Monthly base fee (defaults to FEES_DEFAULT_BASE_FEE)
    #[arg(long)]
    pub(crate) base_fee: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterArgs {
    /// Roster CSV export. Defaults to the built-in sample roster.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct BillingArgs {
    /// Calendar year of the billed month
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub(crate) year: i32,
    /// Billed month (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub(crate) month: u32,
    /// Day of month the fee falls due
    #[arg(long, default_value_t = 10)]
    pub(crate) due_day: u32,
    /// Date used for overdue checks and late fees (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Roster CSV export. Defaults to the built-in sample roster.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) fn run_calculation(args: CalculateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(None, config.fees)?;

    let request = CalculationRequest {
        family_income: args.income,
        academic_score: args.academic_score,
        attendance_percentage: args.attendance,
        has_sibling: args.sibling,
        is_single_parent: args.single_parent,
        has_sports_achievement: args.sports,
        base_fee: args.base_fee,
    };
    let result = service.calculate(&request)?;
    render_evaluation(&result, "");
    Ok(())
}

pub(crate) fn run_fee_summary(args: RosterArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(args.roster, config.fees)?;
    let summary = service.summary()?;
    render_summary(&summary);
    Ok(())
}

pub(crate) fn run_billing(args: BillingArgs) -> Result<(), AppError> {
    let BillingArgs {
        year,
        month,
        due_day,
        today,
        roster,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(roster, config.fees)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let period = BillingPeriod::new(year, month)?;
    let Some(due_date) = period.due_date(due_day) else {
        println!("No valid due date for {} {}", period.month_name(), year);
        return Ok(());
    };

    let records = service.bill_roster(&period, due_date, today)?;
    render_statements(&period, &records, today);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = build_service(None, FeeConfig::default())?;
    let today = Local::now().date_naive();

    println!("Fleet fee demo");
    println!("\nScholarship programs");
    for descriptor in service.catalog() {
        let (low, high) = descriptor.percentage_range;
        println!(
            "- {}: {} ({}-{}% | income up to {:.0})",
            descriptor.label, descriptor.criteria, low, high, descriptor.max_income
        );
    }

    println!("\nRoster assessments");
    for assessment in service.assess_roster()? {
        println!(
            "- {} {} ({})",
            assessment.student_id, assessment.full_name, assessment.class_name
        );
        render_evaluation(&assessment.evaluation, "  ");
    }

    println!();
    render_summary(&service.summary()?);

    let period = BillingPeriod::containing(today)?;
    let Some(due_date) = period.due_date(10) else {
        println!("No valid due date for {}", period.month_name());
        return Ok(());
    };
    let mut records = service.bill_roster(&period, due_date, today)?;
    println!();
    render_statements(&period, &records, today);

    let Some(first) = records.first_mut() else {
        return Ok(());
    };
    let half = (first.balance() / 2.0).round();
    let payment = Payment {
        amount: half,
        paid_on: today,
        method: PaymentMethod::Upi,
        transaction_id: Some("DEMO-0001".to_string()),
    };
    match first.record_payment(payment, today) {
        Ok(()) => println!(
            "\nRecorded {:.2} from {} -> status {} ({:.2}% paid, balance {:.2})",
            half,
            first.student_id,
            first.status.label(),
            first.payment_percentage(),
            first.balance()
        ),
        Err(err) => println!("\nPayment rejected: {}", err),
    }

    let totals = StudentFeeSummary::from_records(&records[..1], today);
    match serde_json::to_string_pretty(&totals) {
        Ok(json) => println!("Student fee totals:\n{}", json),
        Err(err) => println!("Student fee totals unavailable: {}", err),
    }

    Ok(())
}

fn build_service(
    roster: Option<PathBuf>,
    config: FeeConfig,
) -> Result<FeeService<InMemoryStudentRoster>, AppError> {
    let roster = match roster {
        Some(path) => load_roster(Some(&path))?,
        None => InMemoryStudentRoster::with_students(sample_roster()),
    };
    Ok(FeeService::new(Arc::new(roster), config))
}

fn render_evaluation(result: &EvaluationResult, indent: &str) {
    if result.eligible_awards.is_empty() {
        println!("{indent}Eligible scholarships: none");
    } else {
        println!("{indent}Eligible scholarships:");
        for award in &result.eligible_awards {
            let marker = if result.recommended_award.as_ref() == Some(award) {
                " (recommended)"
            } else {
                ""
            };
            println!(
                "{indent}  - {}: {}% = {:.2} [{}]{}",
                award.program.label(),
                award.percentage,
                award.amount,
                award.reason,
                marker
            );
        }
    }
    println!(
        "{indent}Base fee {:.2} | savings {:.2} | final fee {:.2}",
        result.base_fee, result.total_savings, result.final_fee
    );
}

fn render_summary(summary: &FeeSummary) {
    println!("Fee summary");
    println!(
        "- {} students | {} scholarship recipients ({:.1}%)",
        summary.total_students, summary.scholarship_recipients, summary.scholarship_percentage
    );
    println!(
        "- Revenue {:.2} billed of {:.2} base | {:.2} in scholarships",
        summary.total_actual_revenue, summary.total_base_revenue, summary.total_scholarship_amount
    );
    println!(
        "- Average scholarship {:.1}%",
        summary.average_scholarship_percentage
    );
    for entry in &summary.scholarship_breakdown {
        println!(
            "  - {}: {} students | {:.2} saved | {:.1}% average",
            entry.program_label, entry.count, entry.total_savings, entry.average_percentage
        );
    }
}

fn render_statements(period: &BillingPeriod, records: &[FeeRecord], today: NaiveDate) {
    println!(
        "Fee statements for {} {} (academic year {}) as of {}",
        period.month_name(),
        period.year,
        period.academic_year,
        today
    );
    for record in records {
        let scholarship = record
            .scholarship
            .as_ref()
            .map(|applied| format!("{} {}%", applied.program.label(), applied.percentage))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "- {}: base {:.2} | scholarship {} | due {:.2} on {} | {}",
            record.student_id,
            record.base_amount,
            scholarship,
            record.total_due(),
            record.due_date,
            record.status.label()
        );
        if record.late_fee_amount > 0.0 {
            println!(
                "  late fee {:.2} after {} days overdue",
                record.late_fee_amount,
                record.days_overdue(today)
            );
        }
    }

    let totals = StudentFeeSummary::from_records(records, today);
    println!(
        "Totals: {:.2} due | {:.2} paid | {} overdue of {}",
        totals.total_amount, totals.paid_amount, totals.overdue_count, totals.total_fees
    );
}
