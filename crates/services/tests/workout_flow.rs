use fit_core::model::{ExerciseFilter, ExerciseId, WorkoutConfig, WorkoutOutcome};
use fit_core::time::fixed_now;
use fit_core::SessionPhase;
use services::{AppServices, CatalogConfig, Clock, RestTimer};
use storage::repository::Storage;

async fn sqlite_storage(name: &str) -> Storage {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    Storage::sqlite(&url).await.expect("sqlite storage")
}

#[tokio::test]
async fn workout_runs_end_to_end_in_memory() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let workouts = services.workouts();
    let squat = ExerciseId::new("ex_1_squat").unwrap();

    let mut run = workouts.prepare(&squat).await.unwrap();
    workouts
        .start(&mut run, WorkoutConfig::new(squat.clone(), 3, 8, 0))
        .await
        .unwrap();
    while !run.is_finished() {
        workouts.complete_set(&mut run).await.unwrap();
    }

    let history = workouts.history(10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].exercise_id, squat);
    assert_eq!(history[0].outcome, WorkoutOutcome::Finished);
    assert_eq!(history[0].total_reps, 24);
    assert_eq!(Some(history[0].id), run.summary_id());
}

#[tokio::test(start_paused = true)]
async fn rest_timer_drives_the_loop() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let workouts = services.workouts();
    let plank = ExerciseId::new("ex_8_plank").unwrap();

    let mut run = workouts.prepare(&plank).await.unwrap();
    workouts
        .start(&mut run, WorkoutConfig::new(plank, 2, 10, 15))
        .await
        .unwrap();
    workouts.complete_set(&mut run).await.unwrap();

    let mut timer = RestTimer::new();
    timer.sync(run.phase());
    let mut ticks = 0;
    while run.phase() == SessionPhase::Resting {
        timer.next_tick().await;
        workouts.tick(&mut run).await;
        timer.sync(run.phase());
        ticks += 1;
    }

    assert_eq!(ticks, 15);
    assert!(!timer.is_running());
    assert_eq!(run.action_label(), "Finish Workout");
}

#[tokio::test]
async fn sqlite_run_survives_restart() {
    let storage = sqlite_storage("memdb_workout_restart").await;
    let clock = Clock::fixed(fixed_now());
    let first = AppServices::new(&storage, clock, CatalogConfig::default());
    let plank = ExerciseId::new("ex_8_plank").unwrap();

    let mut run = first.workouts().prepare(&plank).await.unwrap();
    first
        .workouts()
        .start(&mut run, WorkoutConfig::new(plank.clone(), 3, 10, 30))
        .await
        .unwrap();
    first.workouts().complete_set(&mut run).await.unwrap();
    first.workouts().skip_rest(&mut run).await.unwrap();

    let second = AppServices::new(&storage, clock, CatalogConfig::default());
    let mut resumed = second.workouts().resume().await.unwrap().expect("snapshot");
    assert_eq!(resumed.exercise().id(), &plank);
    assert_eq!(resumed.phase(), SessionPhase::ActiveSet);
    assert_eq!(resumed.state().current_set_index, 2);
    assert_eq!(resumed.state().completed_sets, 1);

    second.workouts().abandon(&mut resumed).await.unwrap();
    assert!(second.workouts().resume().await.unwrap().is_none());

    let history = second.workouts().history(5).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].outcome, WorkoutOutcome::Abandoned);
    assert_eq!(history[0].completed_sets, 1);
}

#[tokio::test]
async fn sqlite_favorites_and_theme_persist() {
    let storage = sqlite_storage("memdb_services_prefs").await;
    let services = AppServices::new(&storage, Clock::fixed(fixed_now()), CatalogConfig::default());

    let core = services
        .catalog()
        .browse(&ExerciseFilter::new().with_target("abdominals"), 20)
        .await;
    for exercise in &core {
        services.favorites().add(exercise.clone()).await.unwrap();
    }
    services.app_settings().toggle_dark_mode().await.unwrap();

    let reopened = AppServices::new(&storage, Clock::fixed(fixed_now()), CatalogConfig::default());
    let favorites = reopened.favorites().list().await.unwrap();
    assert_eq!(favorites.len(), core.len());
    assert!(reopened.app_settings().load().await.unwrap().dark_mode());
}

#[tokio::test]
async fn starting_over_a_saved_run_records_it_as_abandoned() {
    let storage = sqlite_storage("memdb_workout_replace").await;
    let services = AppServices::new(&storage, Clock::fixed(fixed_now()), CatalogConfig::default());
    let workouts = services.workouts();
    let plank = ExerciseId::new("ex_8_plank").unwrap();
    let squat = ExerciseId::new("ex_1_squat").unwrap();

    let mut first = workouts.prepare(&plank).await.unwrap();
    workouts
        .start(&mut first, WorkoutConfig::new(plank.clone(), 3, 10, 30))
        .await
        .unwrap();
    workouts.complete_set(&mut first).await.unwrap();
    drop(first);

    let mut second = workouts.prepare(&squat).await.unwrap();
    workouts
        .start(&mut second, WorkoutConfig::default_for(squat.clone()))
        .await
        .unwrap();

    let history = workouts.history(5).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].exercise_id, plank);
    assert_eq!(history[0].outcome, WorkoutOutcome::Abandoned);
    assert_eq!(history[0].completed_sets, 1);

    let resumed = workouts.resume().await.unwrap().expect("squat snapshot");
    assert_eq!(resumed.exercise().id(), &squat);
}

#[tokio::test]
async fn restarting_a_finished_run_records_nothing_extra() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let workouts = services.workouts();
    let squat = ExerciseId::new("ex_1_squat").unwrap();

    let mut run = workouts.prepare(&squat).await.unwrap();
    for _ in 0..2 {
        workouts
            .start(&mut run, WorkoutConfig::new(squat.clone(), 1, 5, 0))
            .await
            .unwrap();
        workouts.complete_set(&mut run).await.unwrap();
    }

    let history = workouts.history(5).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history
        .iter()
        .all(|item| item.outcome == WorkoutOutcome::Finished));
}
