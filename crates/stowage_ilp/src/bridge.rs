use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
    process::{Command, ExitStatus},
    time::Duration,
};

use thiserror::Error;
use tracing::{debug, warn};

use stowage_solver::{
    problem::{item::Item, knapsack_problem::KnapsackProblem},
    solver::{deadline::Deadline, outcome::SolveOutcome, strategy::Strategy},
};

use crate::payload::{IlpInput, IlpOutput};

#[derive(Debug, Error)]
pub enum IlpBridgeError {
    #[error("bridge file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("ILP solver exited with {status}: {stderr}")]
    SolverFailed { status: ExitStatus, stderr: String },

    #[error("malformed ILP solver payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("ILP solver selected unknown item id {id}")]
    UnknownItemId { id: String },
}

/// Subprocess bridge to an off-the-shelf integer-programming solver.
///
/// The solver executable is opaque to the core: it is invoked as
/// `program [args...] <input.json> <output.json>`, reads the catalog and
/// capacity from the input file and writes `{total_profit, selected_ids}`
/// to the output file. The requested timeout travels inside the input
/// payload; honoring it is the solver's responsibility.
pub struct IlpBridge {
    program: PathBuf,
    args: Vec<String>,
    work_dir: PathBuf,
}

impl IlpBridge {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        IlpBridge {
            program: program.into(),
            args: Vec::new(),
            work_dir: std::env::temp_dir().join("stowage_ilp"),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn try_solve(
        &self,
        problem: &KnapsackProblem,
        timeout: Duration,
    ) -> Result<SolveOutcome, IlpBridgeError> {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return Ok(SolveOutcome::infeasible(deadline.elapsed()));
        }

        fs::create_dir_all(&self.work_dir)?;
        let input_path = self.work_dir.join("ilp_input.json");
        let output_path = self.work_dir.join("ilp_output.json");

        let input = IlpInput::from_problem(problem, timeout.as_millis() as u64);
        serde_json::to_writer_pretty(File::create(&input_path)?, &input)?;

        debug!(program = %self.program.display(), "invoking external ILP solver");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&input_path)
            .arg(&output_path)
            .output()?;

        if !output.status.success() {
            return Err(IlpBridgeError::SolverFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let reply: IlpOutput = serde_json::from_reader(BufReader::new(File::open(&output_path)?))?;

        let selection = reply
            .selected_ids
            .iter()
            .map(|id| self.find_item(problem, id).cloned())
            .collect::<Result<Vec<Item>, _>>()?;

        Ok(SolveOutcome::solved(
            reply.total_profit,
            selection,
            deadline.elapsed(),
        ))
    }

    fn find_item<'a>(
        &self,
        problem: &'a KnapsackProblem,
        id: &str,
    ) -> Result<&'a Item, IlpBridgeError> {
        problem
            .items()
            .iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| IlpBridgeError::UnknownItemId { id: id.to_owned() })
    }
}

impl Strategy for IlpBridge {
    fn name(&self) -> &'static str {
        "ILP"
    }

    /// Same contract as the native strategies; a bridge failure degrades to
    /// a well-formed empty result instead of surfacing an error.
    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);
        match self.try_solve(problem, timeout) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "ILP bridge failed");
                SolveOutcome::failed(deadline.elapsed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stowage_solver::{
        problem::{container::Container, item::Item},
        solver::outcome::SolveStatus,
    };

    use super::*;

    fn scenario_problem() -> KnapsackProblem {
        KnapsackProblem::new(
            vec![
                Item::new("P1", 10, 60),
                Item::new("P2", 20, 100),
                Item::new("P3", 30, 120),
            ],
            Container::new(50),
        )
        .unwrap()
    }

    fn unique_work_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stowage_ilp_test_{tag}_{}", std::process::id()))
    }

    #[cfg(unix)]
    fn fake_solver(reply: &str) -> Vec<String> {
        // sh -c '<script>' ilp <input> <output> binds the paths to $1/$2.
        vec![
            "-c".to_owned(),
            format!("printf '%s' '{reply}' > \"$2\""),
            "ilp".to_owned(),
        ]
    }

    #[cfg(unix)]
    #[test]
    fn test_reply_is_mapped_back_onto_catalog_items() {
        let bridge = IlpBridge::new("/bin/sh")
            .with_args(fake_solver(r#"{"total_profit":220,"selected_ids":["P2","P3"]}"#))
            .with_work_dir(unique_work_dir("ok"));

        let outcome = bridge
            .try_solve(&scenario_problem(), Duration::from_secs(5))
            .unwrap();

        assert_eq!(outcome.status, SolveStatus::Solved);
        assert_eq!(outcome.profit, 220);
        let ids: Vec<&str> = outcome.selection.iter().map(|item| item.id()).collect();
        assert_eq!(ids, vec!["P2", "P3"]);
        assert_eq!(outcome.total_weight(), 50);
    }

    #[cfg(unix)]
    #[test]
    fn test_unknown_id_in_reply_is_an_error() {
        let bridge = IlpBridge::new("/bin/sh")
            .with_args(fake_solver(r#"{"total_profit":1,"selected_ids":["NOPE"]}"#))
            .with_work_dir(unique_work_dir("unknown"));

        let error = bridge
            .try_solve(&scenario_problem(), Duration::from_secs(5))
            .unwrap_err();

        assert!(matches!(error, IlpBridgeError::UnknownItemId { id } if id == "NOPE"));
    }

    #[cfg(unix)]
    #[test]
    fn test_solver_failure_surfaces_stderr() {
        let bridge = IlpBridge::new("/bin/sh")
            .with_args(vec![
                "-c".to_owned(),
                "echo boom >&2; exit 3".to_owned(),
                "ilp".to_owned(),
            ])
            .with_work_dir(unique_work_dir("fail"));

        let error = bridge
            .try_solve(&scenario_problem(), Duration::from_secs(5))
            .unwrap_err();

        match error {
            IlpBridgeError::SolverFailed { stderr, .. } => assert!(stderr.contains("boom")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strategy_contract_degrades_failure_to_status() {
        let bridge = IlpBridge::new("/nonexistent/solver/binary")
            .with_work_dir(unique_work_dir("missing"));

        let outcome = bridge.solve(&scenario_problem(), Duration::from_secs(1));

        assert_eq!(outcome.status, SolveStatus::Failed);
        assert_eq!(outcome.profit, 0);
        assert!(outcome.selection.is_empty());
    }

    #[test]
    fn test_infeasible_input_skips_the_subprocess() {
        let problem = KnapsackProblem::new(vec![], Container::new(10)).unwrap();
        let bridge = IlpBridge::new("/nonexistent/solver/binary");

        let outcome = bridge.try_solve(&problem, Duration::from_secs(1)).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }
}
