use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven fixed UTBK test components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "PU")]
    PenalaranUmum,
    #[serde(rename = "PPU")]
    PengetahuanPemahamanUmum,
    #[serde(rename = "PM")]
    PenalaranMatematika,
    #[serde(rename = "PBM")]
    PemahamanBacaanMenulis,
    #[serde(rename = "LITERASI_INDO")]
    LiterasiIndonesia,
    #[serde(rename = "LITERASI_INGGRIS")]
    LiterasiInggris,
    #[serde(rename = "PK")]
    PengetahuanKuantitatif,
}

impl Subject {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::PenalaranUmum,
            Self::PengetahuanPemahamanUmum,
            Self::PenalaranMatematika,
            Self::PemahamanBacaanMenulis,
            Self::LiterasiIndonesia,
            Self::LiterasiInggris,
            Self::PengetahuanKuantitatif,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::PenalaranUmum => "PU",
            Self::PengetahuanPemahamanUmum => "PPU",
            Self::PenalaranMatematika => "PM",
            Self::PemahamanBacaanMenulis => "PBM",
            Self::LiterasiIndonesia => "LITERASI_INDO",
            Self::LiterasiInggris => "LITERASI_INGGRIS",
            Self::PengetahuanKuantitatif => "PK",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PenalaranUmum => "Penalaran Umum",
            Self::PengetahuanPemahamanUmum => "Pengetahuan dan Pemahaman Umum",
            Self::PenalaranMatematika => "Penalaran Matematika",
            Self::PemahamanBacaanMenulis => "Pemahaman Bacaan dan Menulis",
            Self::LiterasiIndonesia => "Literasi dalam Bahasa Indonesia",
            Self::LiterasiInggris => "Literasi dalam Bahasa Inggris",
            Self::PengetahuanKuantitatif => "Pengetahuan Kuantitatif",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|subject| subject.code() == code)
    }
}

/// Minimum historical admission score for a (university, major) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffRecord {
    pub university: String,
    pub major: String,
    pub min_score: f64,
}

/// A cutoff the computed average meets, with the non-negative margin.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionMatch {
    pub university: String,
    pub major: String,
    pub min_score: f64,
    pub diff: f64,
}

/// Outcome of one simulation run over a complete score sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub average: f64,
    pub matches: Vec<AdmissionMatch>,
    pub dataset_empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    IncompleteInput { required: usize },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::IncompleteInput { required } => write!(
                f,
                "all {} subject scores must be filled with numbers between 0 and 1000",
                required
            ),
        }
    }
}

impl std::error::Error for EvaluationError {}
