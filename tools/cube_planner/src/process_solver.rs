use cube_logic::{CubeString, Solver, SolverReply};
use std::process::Command;
use tracing::{debug, error};

/// Runs the two-phase solver as a child process, one invocation per cube string.
pub struct ProcessSolver {
    program: String,
    args: Vec<String>,
}

impl ProcessSolver {
    /// `None` when the command line is empty.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Solver for ProcessSolver {
    fn solve(&mut self, cube: &CubeString) -> SolverReply {
        debug!(program = %self.program, %cube, "calling solver");
        let output = match Command::new(&self.program)
            .args(&self.args)
            .arg(cube.as_str())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                error!("failed to start {}: {}", self.program, e);
                return SolverReply::Error(format!("Error: cannot run {}: {}", self.program, e));
            }
        };
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return SolverReply::Error(format!(
                "Error: solver exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }
        SolverReply::parse(&String::from_utf8_lossy(&output.stdout))
    }
}
