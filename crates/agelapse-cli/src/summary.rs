use agelapse_core::pipeline::{BatchReport, RunConfig, SampleOutcome};
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    ok: Style,
    warn: Style,
    error: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            error: Style::new().red().bold(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_summary(config: &RunConfig, eraser_name: &str) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Agelapse"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Root"),
        s.path.apply_to(config.root.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(format!("*.{}", config.extension()))
    );
    if !config.only_samples.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Only"),
            s.value.apply_to(config.only_samples.join(", "))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Background"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Eraser"),
        s.ok.apply_to(eraser_name)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Cycles"),
        s.value.apply_to(config.cycles)
    );
    println!();

    println!("  {}", s.header.apply_to("Alignment"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min area"),
        s.value.apply_to(format!("{} px\u{b2}", config.alignment.min_contour_area))
    );
    println!();

    println!("  {}", s.header.apply_to("Film"));
    if config.film {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Frame rate"),
            s.value.apply_to(format!("{} fps", config.frame_rate))
        );
    } else {
        println!("    {}", s.disabled.apply_to("disabled"));
    }
    println!();
}

pub fn print_batch_report(report: &BatchReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Results"));
    if report.samples.is_empty() {
        println!("    {}", s.warn.apply_to("no sample folders found"));
        return;
    }

    let width = report
        .samples
        .iter()
        .map(|o| o.name().chars().count())
        .max()
        .unwrap_or(0)
        .max(6);
    println!(
        "    {:<width$}  {:>6}  {:>6}  {:>6}  {}",
        s.label.apply_to("Sample"),
        s.label.apply_to("Frames"),
        s.label.apply_to("Saved"),
        s.label.apply_to("Failed"),
        s.label.apply_to("Video"),
    );

    for outcome in &report.samples {
        match outcome {
            SampleOutcome::Completed(run) => {
                let failed = run.failures.len();
                let failed_style = if failed == 0 { &s.ok } else { &s.warn };
                let video = match (&run.video, &run.video_error) {
                    (Some(v), _) => s.path.apply_to(v.path.display().to_string()),
                    (None, Some(_)) => s.error.apply_to("failed".to_string()),
                    (None, None) => s.disabled.apply_to("-".to_string()),
                };
                println!(
                    "    {:<width$}  {:>6}  {:>6}  {:>6}  {}",
                    s.value.apply_to(&run.name),
                    run.frames.len(),
                    run.cropped.len(),
                    failed_style.apply_to(failed),
                    video,
                );
            }
            SampleOutcome::Failed { name, error, .. } => {
                println!(
                    "    {:<width$}  {}",
                    s.value.apply_to(name),
                    s.error.apply_to(error)
                );
            }
        }
    }
    println!();
}
