//! # Results-table walkthrough
//!
//! Loads a small embodied-navigation leaderboard, animates the score
//! counters in, then clicks through a few headers the way a reader would,
//! printing the table with its rank markers after each step.
//!
//! Run with `cargo run --example leaderboard`.

use table_rank::render::MarkupTable;
use table_rank::{RowId, Table, TableRanker};

// ── Data ─────────────────────────────────────────────────────────────────────

fn leaderboard() -> Table {
    Table::new(
        ["Method", "SR", "SPL", "Steps", "Setting"],
        [
            ["Random", "4.1%", "0.02", "500", "-"],
            ["Frontier", "33.7%", "0.15", "412", "classic"],
            ["VLFM", "52.5%", "0.30", "-", "zero-shot"],
            ["ESC", "39.2%", "0.22", "388", "zero-shot"],
            ["L3MVN", "50.4%", "0.23", "-", "trained"],
            ["Ours", "57.9%", "0.31", "301", "zero-shot"],
        ],
    )
    .expect("leaderboard rows match headers")
}

// ── Printing ─────────────────────────────────────────────────────────────────

fn print_table(title: &str, ranker: &TableRanker, target: &MarkupTable) {
    println!("▶  {}\n", title);
    let table = ranker.table();
    let header: Vec<String> = (0..table.column_count())
        .map(|c| {
            let arrow = match ranker.sort_state().direction(c).map(|d| d.indicator_class()) {
                Some("sort-asc") => " ▲",
                Some("sort-desc") => " ▼",
                _ => "",
            };
            format!("{}{}", table.headers()[c], arrow)
        })
        .collect();
    println!("  {}", header.iter().map(|h| format!("{:<14}", h)).collect::<String>());

    for &id in target.order() {
        let Some(row) = table.row(id) else { continue };
        let active = if target.active_row() == Some(id) { "*" } else { " " };
        let cells: String = row
            .cells()
            .iter()
            .enumerate()
            .map(|(c, text)| {
                let mark = target
                    .marker(id, c)
                    .map(|r| format!("[{}]", r.get()))
                    .unwrap_or_default();
                format!("{:<14}", format!("{} {}", text, mark))
            })
            .collect();
        println!(" {}{}", active, cells);
    }
    println!();
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let mut ranker = TableRanker::from_table(leaderboard());
    let mut target = MarkupTable::new(ranker.table().column_count());
    ranker.apply(&mut target);

    let started = ranker.start_counters();
    let frame_ms = ranker.config().counter_frame_ms;
    let mut frames = 0;
    while ranker.counters_running() {
        frames += ranker.advance_counters(frame_ms).expect("counter cells exist").len();
        ranker.apply(&mut target);
    }
    ranker.settle();
    ranker.apply(&mut target);
    println!("{} counters animated in {} frames\n", started, frames);
    print_table("Initial load", &ranker, &target);

    ranker.activate_header(1).expect("SR is sortable");
    ranker.apply(&mut target);
    print_table("Click SR (re-rank pending, markers unchanged)", &ranker, &target);

    ranker.advance(ranker.config().rehighlight_delay_ms);
    ranker.apply(&mut target);
    print_table("SR ascending, after re-rank", &ranker, &target);

    ranker.activate_header(1).expect("SR is sortable");
    ranker.settle();
    ranker.select_row(RowId(5)).expect("row exists");
    ranker.apply(&mut target);
    print_table("SR descending, 'Ours' selected", &ranker, &target);

    ranker.activate_header(3).expect("Steps is sortable");
    ranker.settle();
    ranker.apply(&mut target);
    print_table("Steps ascending (SR arrow cleared)", &ranker, &target);

    match ranker.activate_header(0) {
        Err(e) => println!("Clicking the Method header: {}", e),
        Ok(_) => unreachable!("label column never sorts"),
    }
}
