use std::sync::Arc;

use fit_core::SessionPhase;
use fit_core::model::WorkoutConfig;
use services::{RestTimer, WorkoutError, WorkoutLoopService, WorkoutRun};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// What the user typed at the workout prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Complete,
    Skip,
    Quit,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "c" | "" => Self::Complete,
            "s" => Self::Skip,
            "q" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// Drive one run interactively until it finishes, is abandoned, or stdin closes.
///
/// Everything runs on this task, so engine calls never overlap.
pub async fn drive(
    workouts: Arc<WorkoutLoopService>,
    mut run: WorkoutRun,
    config: Option<WorkoutConfig>,
) -> Result<(), WorkoutError> {
    if let Some(config) = config {
        workouts.start(&mut run, config).await?;
    }

    println!("{}", run.exercise().name());
    print_prompt(&run);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut timer = RestTimer::new();
    timer.sync(run.phase());

    loop {
        tokio::select! {
            () = timer.next_tick() => {
                let state = workouts.tick(&mut run).await;
                if state.phase == SessionPhase::Resting {
                    println!("  rest {}s", state.remaining_rest_seconds);
                } else {
                    print_prompt(&run);
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        debug!(%err, "stdin read failed");
                        None
                    }
                };
                let Some(line) = line else {
                    println!("Workout paused. Continue later with --resume.");
                    return Ok(());
                };
                match Input::parse(&line) {
                    Input::Complete => complete_set(&workouts, &mut run).await?,
                    Input::Skip => match workouts.skip_rest(&mut run).await {
                        Ok(_) => print_prompt(&run),
                        Err(WorkoutError::Engine(err)) => println!("  {err}"),
                        Err(err) => return Err(err),
                    },
                    Input::Quit => {
                        abandon(&workouts, &mut run).await?;
                        println!("Workout abandoned.");
                        return Ok(());
                    }
                    Input::Unknown => println!("  [c] complete set  [s] skip rest  [q] quit"),
                }
            }
        }

        timer.sync(run.phase());
        if run.is_finished() {
            print_finished(&run, workouts.elapsed_secs(&run));
            return Ok(());
        }
    }
}

async fn complete_set(
    workouts: &WorkoutLoopService,
    run: &mut WorkoutRun,
) -> Result<(), WorkoutError> {
    match workouts.complete_set(run).await {
        Ok(_) => {}
        Err(WorkoutError::Engine(err)) => {
            println!("  {err}");
            return Ok(());
        }
        Err(WorkoutError::Storage(err)) if run.has_pending_summary() => {
            debug!(%err, "retrying summary append");
            workouts.finalize_summary(run).await?;
        }
        Err(err) => return Err(err),
    }
    if !run.is_finished() {
        print_prompt(run);
    }
    Ok(())
}

async fn abandon(workouts: &WorkoutLoopService, run: &mut WorkoutRun) -> Result<(), WorkoutError> {
    match workouts.abandon(run).await {
        Ok(_) => Ok(()),
        Err(WorkoutError::Storage(err)) if run.has_pending_summary() => {
            debug!(%err, "retrying summary append");
            workouts.finalize_summary(run).await.map(|_| ())
        }
        Err(err) => Err(err),
    }
}

fn progress_percent(run: &WorkoutRun) -> String {
    format!("{:.0}", run.session().progress_fraction() * 100.0)
}

fn print_prompt(run: &WorkoutRun) {
    let state = run.state();
    let Some(config) = run.config() else {
        return;
    };
    match state.phase {
        SessionPhase::ActiveSet => println!(
            "Set {}/{}: {} reps  ({}% done)  [c] {}  [q] quit",
            state.current_set_index,
            config.total_sets,
            config.reps_per_set,
            progress_percent(run),
            run.action_label()
        ),
        SessionPhase::Resting => println!(
            "Rest {}s before set {}  ({}% done)  [s] skip rest  [q] quit",
            state.remaining_rest_seconds,
            state.current_set_index,
            progress_percent(run)
        ),
        SessionPhase::NotStarted | SessionPhase::Finished => {}
    }
}

fn print_finished(run: &WorkoutRun, elapsed_secs: u64) {
    let state = run.state();
    let reps = run
        .config()
        .map_or(0, |config| u64::from(state.completed_sets) * u64::from(config.reps_per_set));
    println!(
        "Workout complete: {} sets, {} reps in {}m {:02}s.",
        state.completed_sets,
        reps,
        elapsed_secs / 60,
        elapsed_secs % 60
    );
}
