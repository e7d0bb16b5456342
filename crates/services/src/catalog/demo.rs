//! Bundled exercise set used when the remote API is unavailable or unconfigured.

use fit_core::model::Exercise;
use tracing::error;

use super::source::catalog_draft;

struct DemoRow {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    muscle: &'static str,
    equipment: &'static str,
    difficulty: &'static str,
    instructions: &'static str,
}

const DEMO_ROWS: &[DemoRow] = &[
    DemoRow {
        id: "ex_0_bench_press",
        name: "Bench Press",
        kind: "strength",
        muscle: "chest",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Lie flat on a bench with your feet on the floor. Grip the barbell with hands slightly wider than shoulder width. Lower the bar to your chest, then press it back up to the starting position.",
    },
    DemoRow {
        id: "ex_1_squat",
        name: "Squat",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "barbell",
        difficulty: "intermediate",
        instructions: "Stand with feet shoulder-width apart. Lower your body by bending your knees and hips, keeping your back straight. Push through your heels to return to starting position.",
    },
    DemoRow {
        id: "ex_2_deadlift",
        name: "Deadlift",
        kind: "strength",
        muscle: "lower_back",
        equipment: "barbell",
        difficulty: "expert",
        instructions: "Stand with feet hip-width apart, barbell over your feet. Bend at hips and knees, grip the bar. Lift by extending hips and knees, keeping the bar close to your body.",
    },
    DemoRow {
        id: "ex_3_pull_up",
        name: "Pull-up",
        kind: "strength",
        muscle: "lats",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Hang from a pull-up bar with arms fully extended. Pull yourself up until your chin is above the bar. Lower yourself back down with control.",
    },
    DemoRow {
        id: "ex_4_push_up",
        name: "Push-up",
        kind: "strength",
        muscle: "chest",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Start in a plank position with hands shoulder-width apart. Lower your body until chest nearly touches the floor. Push back up to starting position.",
    },
    DemoRow {
        id: "ex_5_bicep_curl",
        name: "Bicep Curl",
        kind: "strength",
        muscle: "biceps",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Stand with dumbbells at your sides, palms facing forward. Curl the weights up to shoulder level. Lower back down with control.",
    },
    DemoRow {
        id: "ex_6_shoulder_press",
        name: "Shoulder Press",
        kind: "strength",
        muscle: "shoulders",
        equipment: "dumbbell",
        difficulty: "beginner",
        instructions: "Hold dumbbells at shoulder height. Press weights overhead until arms are fully extended. Lower back to shoulder height.",
    },
    DemoRow {
        id: "ex_7_lunges",
        name: "Lunges",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Step forward with one leg, lowering your hips until both knees are bent at 90 degrees. Push back to starting position and repeat with other leg.",
    },
    DemoRow {
        id: "ex_8_plank",
        name: "Plank",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Get into a push-up position but rest on your forearms. Keep your body in a straight line from head to heels. Hold this position.",
    },
    DemoRow {
        id: "ex_9_mountain_climbers",
        name: "Mountain Climbers",
        kind: "cardio",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Start in a plank position. Alternate bringing your knees to your chest in a running motion while keeping your core engaged.",
    },
    DemoRow {
        id: "ex_10_burpees",
        name: "Burpees",
        kind: "cardio",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Start standing. Drop to a plank, do a push-up, jump feet to hands, then jump up with arms overhead. Repeat continuously.",
    },
    DemoRow {
        id: "ex_11_jumping_jacks",
        name: "Jumping Jacks",
        kind: "cardio",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Start with feet together and hands at sides. Jump feet apart while raising arms overhead. Jump back to starting position.",
    },
    DemoRow {
        id: "ex_12_tricep_dips",
        name: "Tricep Dips",
        kind: "strength",
        muscle: "triceps",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Position hands on a bench behind you. Lower your body by bending elbows to 90 degrees. Push back up to starting position.",
    },
    DemoRow {
        id: "ex_13_leg_raises",
        name: "Leg Raises",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Lie on your back with legs straight. Raise legs to vertical position keeping them straight. Lower back down without touching the floor.",
    },
    DemoRow {
        id: "ex_14_crunches",
        name: "Crunches",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Lie on your back with knees bent. Place hands behind head. Curl upper body toward knees. Lower back down with control.",
    },
    DemoRow {
        id: "ex_15_russian_twists",
        name: "Russian Twists",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Sit with knees bent and feet off the ground. Lean back slightly. Rotate your torso from side to side, touching the ground beside you.",
    },
    DemoRow {
        id: "ex_16_side_plank",
        name: "Side Plank",
        kind: "strength",
        muscle: "abdominals",
        equipment: "body_only",
        difficulty: "intermediate",
        instructions: "Lie on your side and prop yourself up on one forearm. Keep body in a straight line. Hold this position, then switch sides.",
    },
    DemoRow {
        id: "ex_17_wall_sit",
        name: "Wall Sit",
        kind: "strength",
        muscle: "quadriceps",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Lean against a wall and slide down until thighs are parallel to ground. Keep back flat against wall. Hold this position.",
    },
    DemoRow {
        id: "ex_18_calf_raises",
        name: "Calf Raises",
        kind: "strength",
        muscle: "calves",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Stand with feet hip-width apart. Rise up onto your toes as high as possible. Lower back down with control. Repeat.",
    },
    DemoRow {
        id: "ex_19_high_knees",
        name: "High Knees",
        kind: "cardio",
        muscle: "quadriceps",
        equipment: "body_only",
        difficulty: "beginner",
        instructions: "Run in place while lifting your knees as high as possible. Pump your arms and maintain a quick pace.",
    },
];

/// The bundled demo catalog, in display order.
#[must_use]
pub fn demo_exercises() -> Vec<Exercise> {
    DEMO_ROWS
        .iter()
        .filter_map(|row| {
            catalog_draft(
                row.id.to_string(),
                row.name,
                row.kind,
                row.muscle,
                row.equipment,
                row.difficulty,
                row.instructions,
            )
            .validate()
            .inspect_err(|err| error!(id = row.id, %err, "invalid bundled exercise"))
            .ok()
        })
        .collect()
}
