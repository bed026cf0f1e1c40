use crate::domain::model::{Decomposition, VerificationReport};
use crate::utils::error::{GoldbachError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn report_filename(&self) -> String {
        format!("goldbach_report.{}", self.extension())
    }
}

pub fn render(report: &VerificationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => render_csv(report),
    }
}

pub fn render_decomposition(decomposition: &Decomposition) -> String {
    let mut out = format!(
        "We found {} Goldbach pair(s) for {}:\n",
        decomposition.count(),
        decomposition.target
    );
    for (p, q) in decomposition.pairs() {
        // 寫入 String 不會失敗
        let _ = writeln!(out, "{} = {} + {}", decomposition.target, p, q);
    }
    out
}

fn render_text(report: &VerificationReport) -> String {
    report
        .decompositions
        .iter()
        .map(|d| render_decomposition(d) + "\n")
        .collect()
}

fn render_csv(report: &VerificationReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["target", "pair_count", "smaller", "larger"])?;

    for decomposition in &report.decompositions {
        let target = decomposition.target.to_string();
        let count = decomposition.count().to_string();
        if decomposition.pairs.is_empty() {
            writer.write_record(&[target, count, String::new(), String::new()])?;
            continue;
        }
        for (p, q) in decomposition.pairs() {
            writer.write_record(&[target.clone(), count.clone(), p.to_string(), q.to_string()])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GoldbachError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| GoldbachError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
