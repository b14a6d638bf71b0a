// ===== saasi/src/reports/mod.rs =====
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use saasi::progress::unlock::{Phase, UnlockThresholds};
use saasi::progress::{OverallLevel, PhaseHistory, ProgressSummary};
use saasi::storage::PhaseResult;
use strum::IntoEnumIterator;

fn level_color(color: &str) -> Color {
    match color {
        "gold" => Color::Yellow,
        "silver" => Color::White,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "orange" => Color::DarkYellow,
        "red" => Color::Red,
        _ => Color::Grey,
    }
}

pub fn print_progress_report(
    history: &PhaseHistory,
    summary: &ProgressSummary,
    level: &OverallLevel,
    thresholds: &UnlockThresholds,
) {
    println!("\n📋 === TRAINING PROGRESS === 📋");

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Phase").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Level"),
        Cell::new("Duration"),
        Cell::new("Access"),
    ]);
    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for phase in Phase::iter() {
        let prior = phase.prev().and_then(|p| history.get(p));
        let unlock = thresholds.check(phase, prior);

        let row = match history.get(phase) {
            Some(r) => vec![
                Cell::new(phase.title()).add_attribute(Attribute::Bold),
                Cell::new(format!("{}/{}", r.score, r.max_score)).fg(Color::Cyan),
                Cell::new(&r.level),
                Cell::new(format!("{}s", r.duration)),
                Cell::new(if r.generated { "seeded" } else { "earned" }),
            ],
            None => vec![
                Cell::new(phase.title()),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
                if unlock.unlocked {
                    Cell::new("open").fg(Color::Green)
                } else {
                    Cell::new("locked").fg(Color::Red)
                },
            ],
        };
        table.add_row(row);
    }
    println!("{}", table);

    println!(
        "\nTotal: {}/400 ({}%) across {} phase(s), average {}",
        summary.total_score, summary.percentage, summary.completed_phases, summary.average_score
    );

    let mut level_table = Table::new();
    level_table.load_preset(ASCII_FULL);
    level_table.add_row(vec![
        Cell::new(&level.title)
            .add_attribute(Attribute::Bold)
            .fg(level_color(&level.color)),
        Cell::new(&level.description),
    ]);
    println!("{}", level_table);
}

pub fn print_generated(results: &[PhaseResult]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Phase").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Level"),
    ]);
    for r in results {
        let title = Phase::from_number(r.phase)
            .map(|p| p.title())
            .unwrap_or("Unknown");
        table.add_row(vec![
            Cell::new(title),
            Cell::new(format!("{}/{}", r.score, r.max_score)).fg(Color::Cyan),
            Cell::new(&r.level),
        ]);
    }
    println!("{}", table);
    println!("(Seeded results are marked generated in the saved data.)");
}
