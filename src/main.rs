use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

use tray_nutrition_rs::cli::{Cli, Command};
use tray_nutrition_rs::config::AppConfig;
use tray_nutrition_rs::detection::{Detector, LabelMapDetector, TrayImage};
use tray_nutrition_rs::engine::{Corrections, MealContext};
use tray_nutrition_rs::error::Result;
use tray_nutrition_rs::interface::{
    confirm_profile, display_catalog, display_detected, display_empty_selection, display_profiles,
    display_report, is_interactive, prompt_food_corrections, prompt_profile, reports_json,
};
use tray_nutrition_rs::logging;
use tray_nutrition_rs::models::{AnalysisReport, IntakeProfile, SelectionSet};

fn main() {
    logging::init();

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns false when some images could not be analysed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let ctx = config.load_context()?;

    match cli.command {
        Command::Profiles => {
            display_profiles(&ctx.profiles, ctx.meal_fraction);
            Ok(true)
        }
        Command::Foods => {
            display_catalog(&ctx.catalog);
            Ok(true)
        }
        Command::Evaluate {
            foods,
            profile,
            json,
        } => {
            cmd_evaluate(&ctx, &foods, profile.as_deref(), json)?;
            Ok(true)
        }
        Command::Analyze {
            images,
            profile,
            add,
            remove,
            no_edit,
            json,
        } => {
            // A missing or broken model stops everything before any photo is read.
            let detector = LabelMapDetector::load(&config.model_path, config.confidence_threshold)?;
            let corrections = Corrections { add, remove };
            let prompt = !no_edit && is_interactive();
            cmd_analyze(
                &ctx,
                &detector,
                &images,
                profile.as_deref(),
                &corrections,
                prompt,
                json,
            )
        }
    }
}

/// Config file values with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    if let Some(model) = &cli.model {
        config.model_path = model.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(profiles) = &cli.profiles {
        config.profiles_path = Some(profiles.clone());
    }
    if let Some(fraction) = cli.meal_fraction {
        config.meal_fraction = fraction;
    }

    config.validate()?;
    Ok(config)
}

/// Pick the profile from the flag, a prompt, or the default.
fn choose_profile<'a>(ctx: &'a MealContext, requested: Option<&str>) -> Result<&'a IntakeProfile> {
    match requested {
        Some(name) => confirm_profile(&ctx.profiles, name),
        None if is_interactive() => prompt_profile(&ctx.profiles),
        None => Ok(ctx.profiles.default_profile()),
    }
}

/// Analyse each photo in turn. One failing photo does not stop the others.
fn cmd_analyze(
    ctx: &MealContext,
    detector: &dyn Detector,
    images: &[PathBuf],
    profile: Option<&str>,
    corrections: &Corrections,
    prompt: bool,
    json: bool,
) -> Result<bool> {
    let profile = choose_profile(ctx, profile)?;

    let review = |image: &TrayImage, detected: &BTreeSet<String>, candidates: SelectionSet| {
        if !json {
            println!();
            println!(
                "=== {} ({}x{}) ===",
                image.path().display(),
                image.width(),
                image.height()
            );
            display_detected(detected);
        }
        if prompt {
            prompt_food_corrections(&ctx.catalog, &candidates)
        } else {
            Ok(candidates)
        }
    };

    let mut reports = Vec::new();
    let mut failed = 0;
    for (path, result) in ctx.analyze_photos(detector, images, profile, corrections, review) {
        match result {
            Ok(report) if json => reports.push(report),
            Ok(report) => show_report(&report),
            Err(e) => {
                eprintln!("Analysis failed for {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if json {
        println!("{}", reports_json(&reports)?);
    }
    if failed > 0 {
        eprintln!("{} of {} images could not be analysed.", failed, images.len());
    }
    Ok(failed == 0)
}

/// Check a typed list of foods.
fn cmd_evaluate(
    ctx: &MealContext,
    foods: &[String],
    profile: Option<&str>,
    json: bool,
) -> Result<()> {
    let profile = choose_profile(ctx, profile)?;

    let mut selection = SelectionSet::new();
    selection.apply_edits(foods, std::iter::empty::<&str>());
    let report = ctx.analyze(profile, &selection);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        show_report(&report);
    }
    Ok(())
}

fn show_report(report: &AnalysisReport) {
    if report.selection.is_empty() {
        display_empty_selection();
    } else {
        display_report(report);
    }
}
