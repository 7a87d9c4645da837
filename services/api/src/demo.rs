use crate::infra::{InMemoryEsgRepository, StaticWeatherProvider};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use greenledger::error::AppError;
use greenledger::invoice::{InvoiceScanRequest, TextInvoiceExtractor};
use greenledger::scoring::{
    EsgInputs, FactorCatalog, InvoiceScanReport, ScanSource, ScoringWeights,
    SustainabilityService,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ScanArgs {
    /// Invoice CSV (`Item,Quantity,Unit,Unit Price[,Category]`). Omit to
    /// score the fallback sample invoice.
    #[arg(long)]
    pub(crate) invoice: Option<PathBuf>,
    /// Optional emission factor catalog CSV overriding the built-in table.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Credit the earned carbon credits to this user's ledger.
    #[arg(long)]
    pub(crate) user: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// User identifier used across the demo pipeline.
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Location passed to the weather collaborator.
    #[arg(long, default_value = "Des Moines")]
    pub(crate) location: String,
}

type DemoService =
    SustainabilityService<InMemoryEsgRepository, TextInvoiceExtractor, StaticWeatherProvider>;

fn build_service(catalog: FactorCatalog) -> Arc<DemoService> {
    Arc::new(SustainabilityService::new(
        Arc::new(InMemoryEsgRepository::default()),
        Arc::new(TextInvoiceExtractor),
        Arc::new(StaticWeatherProvider::default()),
        Arc::new(catalog),
        ScoringWeights::default(),
    ))
}

fn load_catalog(path: Option<&PathBuf>) -> Result<FactorCatalog, AppError> {
    match path {
        Some(path) => Ok(FactorCatalog::from_csv_path(2, path)?),
        None => Ok(FactorCatalog::standard()),
    }
}

fn scan_request(invoice: Option<&PathBuf>) -> Result<InvoiceScanRequest, AppError> {
    let invoice_text = invoice.map(std::fs::read_to_string).transpose()?;
    Ok(InvoiceScanRequest {
        image_data: None,
        invoice_text,
    })
}

fn render_scan_report(report: &InvoiceScanReport) {
    match report.source {
        ScanSource::Extracted => println!("Invoice extracted from submitted text"),
        ScanSource::Fallback => println!(
            "Extraction degraded to sample data ({})",
            report.degraded_reason.as_deref().unwrap_or("unknown")
        ),
    }
    println!(
        "- {} | {} | {} | total ${:.2}",
        report.document.vendor_name,
        report.document.invoice_number,
        report.document.date,
        report.document.total_amount
    );
    println!("Emission breakdown:");
    for line in &report.impact.breakdown {
        println!(
            "  - {} -> {} @ {} kg/unit = {:.2} kg CO2e",
            line.item, line.category, line.factor_kg, line.emissions_kg
        );
    }
    println!(
        "Total: {:.2} kg CO2e | credits earned: {:.4}",
        report.impact.total_emissions_kg, report.impact.credits_earned
    );
}

pub(crate) fn run_scan(args: ScanArgs) -> Result<(), AppError> {
    let ScanArgs {
        invoice,
        catalog,
        user,
    } = args;

    let service = build_service(load_catalog(catalog.as_ref())?);
    let request = scan_request(invoice.as_ref())?;
    let report = service.scan_invoice(user.as_deref(), &request)?;

    render_scan_report(&report);
    Ok(())
}

fn demo_survey() -> EsgInputs {
    EsgInputs {
        scope1_emissions_t: 120.0,
        scope2_emissions_t: 80.0,
        scope3_emissions_t: 300.0,
        waste_generated_t: 40.0,
        waste_recycled_t: 30.0,
        renewable_energy_percent: Some(45.0),
        employee_count: 250,
        safety_incidents: 2,
        diversity_score: Some(62.0),
        report_name: "FY25 Baseline".to_string(),
        reporting_period: "2025-H1".to_string(),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { user, location } = args;

    println!("Carbon accounting demo");
    let service = build_service(FactorCatalog::standard());

    println!("\nStep 1: invoice scan (no payload, exercising the fallback path)");
    let report = service.scan_invoice(Some(&user), &InvoiceScanRequest::default())?;
    render_scan_report(&report);

    println!("\nStep 2: ESG survey submission");
    let scores = service.submit_esg(&user, demo_survey())?;
    println!(
        "- environmental {:.1} | social {:.1} | governance {:.1} | overall {:.2}",
        scores.environmental, scores.social, scores.governance, scores.overall
    );

    println!("\nStep 3: composite green score");
    let green = service.green_score(&user, &location)?;
    println!(
        "- overall {} (carbon {:.1} | waste {:.1} | energy {:.1} | compliance {:.1})",
        green.score.overall,
        green.score.factors.carbon_efficiency,
        green.score.factors.waste_management,
        green.score.factors.energy_usage,
        green.score.factors.compliance
    );
    println!(
        "- context: {:.1} C, {:.0}% humidity, AQI {}",
        green.weather_context.temperature_c,
        green.weather_context.humidity_percent,
        green
            .weather_context
            .air_quality_index
            .map(|aqi| aqi.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );
    if green.score.recommendations.is_empty() {
        println!("- recommendations: none");
    } else {
        println!("- recommendations:");
        for recommendation in &green.score.recommendations {
            println!("    - {recommendation}");
        }
    }

    match serde_json::to_string_pretty(&green) {
        Ok(json) => println!("\nGreen score payload:\n{json}"),
        Err(err) => println!("\nGreen score payload unavailable: {err}"),
    }

    Ok(())
}
