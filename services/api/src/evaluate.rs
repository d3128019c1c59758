use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;
use utbk_sim::config::AppConfig;
use utbk_sim::error::AppError;
use utbk_sim::simulation::report::EvaluationView;
use utbk_sim::simulation::{evaluate, load_cutoffs, Subject};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Penalaran Umum score (0-1000)
    #[arg(long)]
    pub(crate) pu: Option<String>,
    /// Pengetahuan dan Pemahaman Umum score (0-1000)
    #[arg(long)]
    pub(crate) ppu: Option<String>,
    /// Penalaran Matematika score (0-1000)
    #[arg(long)]
    pub(crate) pm: Option<String>,
    /// Pemahaman Bacaan dan Menulis score (0-1000)
    #[arg(long)]
    pub(crate) pbm: Option<String>,
    /// Literasi dalam Bahasa Indonesia score (0-1000)
    #[arg(long = "literasi-indo")]
    pub(crate) literasi_indo: Option<String>,
    /// Literasi dalam Bahasa Inggris score (0-1000)
    #[arg(long = "literasi-inggris")]
    pub(crate) literasi_inggris: Option<String>,
    /// Pengetahuan Kuantitatif score (0-1000)
    #[arg(long)]
    pub(crate) pk: Option<String>,
    /// Override the configured cutoff dataset path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

impl EvaluateArgs {
    fn score_sheet(&self) -> HashMap<Subject, String> {
        let fields = [
            (Subject::PenalaranUmum, &self.pu),
            (Subject::PengetahuanPemahamanUmum, &self.ppu),
            (Subject::PenalaranMatematika, &self.pm),
            (Subject::PemahamanBacaanMenulis, &self.pbm),
            (Subject::LiterasiIndonesia, &self.literasi_indo),
            (Subject::LiterasiInggris, &self.literasi_inggris),
            (Subject::PengetahuanKuantitatif, &self.pk),
        ];

        fields
            .into_iter()
            .filter_map(|(subject, value)| value.clone().map(|raw| (subject, raw)))
            .collect()
    }
}

pub(crate) fn run_evaluation(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset_path = args.dataset.clone().unwrap_or(config.dataset.path);

    let cutoffs = load_cutoffs(&dataset_path)?;
    let evaluation = evaluate(&args.score_sheet(), &cutoffs)?;

    render_evaluation(&evaluation.view());
    Ok(())
}

fn render_evaluation(view: &EvaluationView) {
    println!("Average UTBK score: {:.2}", view.average);

    if let Some(warning) = &view.warning {
        println!("Warning: {warning}");
        return;
    }

    if view.matches.is_empty() {
        println!("No majors are within reach of this average.");
        return;
    }

    println!("Top {} reachable majors:", view.matches.len());
    for (index, matched) in view.matches.iter().enumerate() {
        println!("{:>2}. {} - {}", index + 1, matched.university, matched.major);
        println!(
            "    Skor minimum: {:.2} | Selisih: {}",
            matched.min_score, matched.diff_label
        );
    }
}
