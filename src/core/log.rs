use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

const OP_COLUMN_MAX: usize = 60;

/// Color of an operation name in the log listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "profile" => Colour::Cyan,
        "shift" => Colour::Green,
        "adjust" => Colour::Yellow,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, cut to `max` visible characters.
fn op_target_label(operation: &str, target: &str, max: usize) -> String {
    let label = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    if label.chars().count() > max {
        let mut s: String = label.chars().take(max - 3).collect();
        s.push_str("...");
        s
    } else {
        label
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries
            .iter()
            .map(|(_, _, op, target, _)| op_target_label(op, target, OP_COLUMN_MAX))
            .collect();

        let op_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for ((id, date, operation, _, message), label) in entries.iter().zip(&labels) {
            let date = chrono::DateTime::parse_from_rfc3339(date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| date.clone());

            // only the operation word is colored, padding is computed on visible text
            let color = color_for_operation(operation);
            let colored = match label.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(label.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(label.chars().count()));

            println!(
                "{:>id_w$}: {:<25} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
