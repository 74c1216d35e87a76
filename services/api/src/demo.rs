use crate::infra::{
    score_records, scorer_from_config, FormulaArg, InMemoryDealRepository, PropertyArgs,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use wholesale_ai::config::{AnalysisConfig, AppConfig};
use wholesale_ai::error::AppError;
use wholesale_ai::workflows::deals::portfolio::{DealService, NewDeal};
use wholesale_ai::workflows::deals::{
    compute_mao, estimate_arv, import_properties_from_path, intake_mao, AnalysisKind,
    AnalysisSession, AnalysisSource, AnalysisState, DealAnalysisResult, DealScorer, FactorImpact,
    HttpAnalysisGateway, MaoEstimate, MaoFormula, PropertyRecord, ResolvedAnalysis,
    ResultResolver, SessionOutcome,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) property: PropertyArgs,
    /// Ask the configured remote analysis first and fall back to local scoring
    #[arg(long)]
    pub(crate) remote: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MaoArgs {
    #[command(flatten)]
    pub(crate) property: PropertyArgs,
    /// Offer formula to apply
    #[arg(long, value_enum, default_value_t = FormulaArg::SeventyPercent)]
    pub(crate) formula: FormulaArg,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with address,city,state,price,arv,mao,sqft,repair_costs,holding_costs
    pub(crate) path: PathBuf,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let record = args.property.into_record();

    if !args.remote {
        let result = scorer_from_config(&config.analysis).evaluate(&record);
        render_analysis(&result, None);
        return Ok(());
    }

    let gateway = HttpAnalysisGateway::new(&config.analysis)?;
    let resolver = ResultResolver::new(
        Arc::new(gateway),
        scorer_from_config(&config.analysis),
        config.analysis.timeout,
    );
    match resolver.resolve(&record, AnalysisKind::DealAnalysis).await {
        Ok(ResolvedAnalysis::Deal { source, result }) => render_analysis(&result, Some(source)),
        Ok(ResolvedAnalysis::Text { content, .. }) => println!("{content}"),
        Err(err) => return Err(AppError::Analysis(err.source)),
    }
    Ok(())
}

pub(crate) fn run_mao(args: MaoArgs) -> Result<(), AppError> {
    let record = args.property.into_record();
    let estimate = compute_mao(&record, args.formula.into());
    render_mao(&record, &estimate);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let scorer = scorer_from_config(&config.analysis);
    let records = import_properties_from_path(&args.path)?;
    let rows = score_records(&scorer, &records);

    println!("Scored {} properties from {}", rows.len(), args.path.display());
    println!(
        "{:<4} {:<30} {:<18} {:>5}  {}",
        "#", "Address", "City", "Score", "Rating"
    );
    for row in &rows {
        println!(
            "{:<4} {:<30} {:<18} {:>5}  {}",
            row.row,
            truncate(&row.address, 30),
            truncate(&row.city, 18),
            row.score,
            row.rating
        );
    }

    if let Some(best) = rows.iter().max_by_key(|row| row.score) {
        println!(
            "\nBest candidate: row {} ({}) at {}/100. {}",
            best.row, best.address, best.score, best.recommendation
        );
    }
    Ok(())
}

pub(crate) async fn run_demo() -> Result<(), AppError> {
    println!("Wholesale deal analysis demo");

    let scorer = DealScorer::default();
    for (label, record) in sample_properties() {
        println!("\n{label}: {}", record.address);
        render_analysis(&scorer.evaluate(&record), None);
    }

    println!("\nOffer math");
    let flip = PropertyRecord {
        address: "2210 Cedar Ln".to_string(),
        asking_price: 180_000.0,
        arv: 280_000.0,
        repair_cost_estimate: 30_000.0,
        square_feet: 1_650.0,
        ..PropertyRecord::default()
    };
    for formula in [MaoFormula::SeventyPercent, MaoFormula::SeventyPercentWithHolding] {
        render_mao(&flip, &compute_mao(&flip, formula));
    }

    println!("\nRemote analysis without an endpoint");
    let gateway = HttpAnalysisGateway::new(&AnalysisConfig::default())?;
    let resolver = Arc::new(ResultResolver::new(
        Arc::new(gateway),
        scorer.clone(),
        AnalysisConfig::default().timeout,
    ));
    let session = AnalysisSession::new(resolver.clone());
    for kind in [AnalysisKind::DealAnalysis, AnalysisKind::PropertyDescription] {
        match session.analyze(&flip, kind).await {
            SessionOutcome::Completed(AnalysisState::Succeeded {
                analysis: ResolvedAnalysis::Deal { source, result },
                ..
            }) => {
                println!("- {kind}: {} via {}", result.score, source_label(source));
            }
            SessionOutcome::Completed(AnalysisState::Failed { reason, .. }) => {
                println!("- {kind}: unavailable ({reason})");
            }
            SessionOutcome::Completed(state) => println!("- {kind}: {state:?}"),
            SessionOutcome::Superseded { request_id } => {
                println!("- {kind}: request {request_id} superseded");
            }
        }
    }

    println!("\nPortfolio");
    let deals = DealService::new(Arc::new(InMemoryDealRepository::default()), scorer);
    for (_, record) in sample_properties() {
        let new_deal = NewDeal {
            title: None,
            status: Default::default(),
            property_data: record,
        };
        if let Err(err) = deals.create(new_deal) {
            println!("  Deal rejected: {err}");
        }
    }
    match deals.list(None) {
        Ok(records) => {
            for deal in records {
                let view = deal.summary_view();
                println!(
                    "- {} {} | {} ({}) | profit ${:.0}",
                    view.id.0,
                    view.title,
                    view.score,
                    view.rating,
                    view.potential_profit
                );
            }
        }
        Err(err) => println!("  Portfolio unavailable: {err}"),
    }
    match deals.statistics() {
        Ok(stats) => println!(
            "  {} deals | {} active | ${:.0} total potential profit",
            stats.total_deals, stats.active_listings, stats.total_potential_profit
        ),
        Err(err) => println!("  Statistics unavailable: {err}"),
    }

    Ok(())
}

fn sample_properties() -> Vec<(&'static str, PropertyRecord)> {
    let over_mao_arv = 314_286.0;
    vec![
        (
            "Healthy spread",
            PropertyRecord {
                address: "1418 Maple Ave".to_string(),
                city: "Des Moines".to_string(),
                state: "IA".to_string(),
                asking_price: 250_000.0,
                arv: 350_000.0,
                ..PropertyRecord::default()
            },
        ),
        (
            "Priced above MAO",
            PropertyRecord {
                address: "77 Grand Blvd".to_string(),
                city: "West Des Moines".to_string(),
                state: "IA".to_string(),
                asking_price: 220_000.0,
                arv: over_mao_arv,
                mao: intake_mao(over_mao_arv).unwrap_or(0.0),
                ..PropertyRecord::default()
            },
        ),
        (
            "Tight margin",
            PropertyRecord {
                address: "5 Birch Ct".to_string(),
                city: "Ankeny".to_string(),
                state: "IA".to_string(),
                asking_price: 300_000.0,
                arv: 305_000.0,
                ..PropertyRecord::default()
            },
        ),
    ]
}

fn render_analysis(result: &DealAnalysisResult, source: Option<AnalysisSource>) {
    println!("Deal score: {}/100 ({})", result.score, result.rating);
    if let Some(source) = source {
        println!("Source: {}", source_label(source));
    }
    println!("Confidence: {:.0}%", result.confidence);
    if result.factors.is_empty() {
        println!("Factors: none triggered");
    } else {
        println!("Factors:");
        for factor in &result.factors {
            println!(
                "  {} {}: {}",
                impact_marker(factor.impact),
                factor.name,
                factor.description
            );
        }
    }
    println!("Recommendation: {}", result.recommendation);
}

fn render_mao(record: &PropertyRecord, estimate: &MaoEstimate) {
    let formula = match estimate.formula {
        MaoFormula::SeventyPercent => "70% rule",
        MaoFormula::SeventyPercentWithHolding => "70% rule with holding costs",
    };
    println!("- {formula}: MAO ${:.0}", estimate.mao);
    if let Some(profit) = estimate.profit_potential {
        println!("  Profit potential: ${profit:.0}");
    }
    if let Some(verdict) = estimate.verdict {
        println!("  Verdict: {} ({})", verdict.label(), verdict.score());
    }
    if record.arv().is_none() {
        let guess = estimate_arv(record.asking_price, record.square_feet);
        if guess > 0.0 {
            println!("  No ARV supplied; market estimate ${guess:.0}");
        }
    }
}

fn source_label(source: AnalysisSource) -> &'static str {
    match source {
        AnalysisSource::Remote => "remote analysis",
        AnalysisSource::Fallback => "local scoring",
    }
}

fn impact_marker(impact: FactorImpact) -> &'static str {
    match impact {
        FactorImpact::Positive => "+",
        FactorImpact::Negative => "-",
        FactorImpact::Neutral => "=",
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
