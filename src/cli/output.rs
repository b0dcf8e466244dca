//! Output formatting for CLI

use crate::{
    pipeline::TrainingResult,
    rps::{Move, State},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the counts and rates of a run
pub fn print_result(result: &TrainingResult) {
    print_kv("Rounds", &format_number(result.total_rounds));
    print_kv(
        "W / D / L",
        &format!("{} / {} / {}", result.wins, result.draws, result.losses),
    );
    print_kv("Win rate", &format_percent(result.win_rate));
    print_kv("Draw rate", &format_percent(result.draw_rate));
    print_kv("Loss rate", &format_percent(result.loss_rate));
    print_kv("Final epsilon", &format!("{:.4}", result.final_epsilon));
}

/// Print the greedy action of every state
pub fn print_policy(policy: &[(State, Move)]) {
    println!("  {:<12} greedy", "state");
    for (state, action) in policy {
        println!("  {:<12} {}", state.to_string(), action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(0.1234), "12.3%");
    }
}
