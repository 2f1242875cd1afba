//! Generated problem instances and their domain payloads

use crate::error::SolverError;
use crate::sat::CnfFormula;
use crate::solve::Witness;
use crate::subset_sum::SubsetSumInstance;
use crate::tsp::TspInstance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tag identifying the problem domain of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemKind {
    Sat,
    SubsetSum,
    Tsp,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Sat => write!(f, "SAT"),
            ProblemKind::SubsetSum => write!(f, "SubsetSum"),
            ProblemKind::Tsp => write!(f, "TSP"),
        }
    }
}

impl std::str::FromStr for ProblemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sat" => Ok(ProblemKind::Sat),
            "subset-sum" | "subset_sum" | "subsetsum" => Ok(ProblemKind::SubsetSum),
            "tsp" => Ok(ProblemKind::Tsp),
            other => Err(format!(
                "unknown problem kind '{other}' (expected sat, subset-sum, or tsp)"
            )),
        }
    }
}

/// Domain-specific problem data. Exactly one variant per [`ProblemKind`], so
/// a payload can never disagree with its tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Payload {
    Sat(CnfFormula),
    SubsetSum(SubsetSumInstance),
    Tsp(TspInstance),
}

impl Payload {
    pub fn kind(&self) -> ProblemKind {
        match self {
            Payload::Sat(_) => ProblemKind::Sat,
            Payload::SubsetSum(_) => ProblemKind::SubsetSum,
            Payload::Tsp(_) => ProblemKind::Tsp,
        }
    }
}

/// Metadata attached by a generator. A known witness, when present, lets
/// tests verify solver output against the planted solution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_witness: Option<Witness>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A generated problem instance. Immutable once produced; each solver call
/// receives a shared reference and owns its own search state exclusively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInstance {
    /// Characteristic size: variables for SAT, set size for Subset Sum,
    /// cities for TSP.
    pub size: usize,

    /// Parameters the generator was invoked with.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,

    pub payload: Payload,

    #[serde(default)]
    pub metadata: Metadata,
}

impl ProblemInstance {
    pub fn new(size: usize, payload: Payload) -> Self {
        Self {
            size,
            parameters: BTreeMap::new(),
            payload,
            metadata: Metadata::default(),
        }
    }

    pub fn kind(&self) -> ProblemKind {
        self.payload.kind()
    }

    /// Runtime tag check at the SAT solver boundary.
    pub fn as_sat(&self) -> Result<&CnfFormula, SolverError> {
        match &self.payload {
            Payload::Sat(formula) => Ok(formula),
            other => Err(SolverError::PayloadMismatch {
                expected: ProblemKind::Sat,
                actual: other.kind(),
            }),
        }
    }

    /// Runtime tag check at the Subset Sum solver boundary.
    pub fn as_subset_sum(&self) -> Result<&SubsetSumInstance, SolverError> {
        match &self.payload {
            Payload::SubsetSum(instance) => Ok(instance),
            other => Err(SolverError::PayloadMismatch {
                expected: ProblemKind::SubsetSum,
                actual: other.kind(),
            }),
        }
    }

    /// Runtime tag check at the TSP solver boundary.
    pub fn as_tsp(&self) -> Result<&TspInstance, SolverError> {
        match &self.payload {
            Payload::Tsp(instance) => Ok(instance),
            other => Err(SolverError::PayloadMismatch {
                expected: ProblemKind::Tsp,
                actual: other.kind(),
            }),
        }
    }
}
