//! Interactive session
//!
//! A read-eval loop over the agent: each request is answered, then the user
//! is asked whether the answer helped and the reply is fed back as learning.

use anyhow::Result;
use crossterm::{execute, style::{Color, Print, ResetColor, SetForegroundColor}};
use rustyline::error::ReadlineError;
use std::io;

use super::{AgentStatus, ConstraintAgent, LearningReport};
use crate::types::{Response, SolutionType};

/// Print a colored line
pub fn print_colored(text: &str, color: Color) {
    let _ = execute!(
        io::stdout(),
        SetForegroundColor(color),
        Print(text),
        ResetColor,
        Print("\n")
    );
}

/// Show a response, with the constraint analysis when `trace` is set
pub fn print_response(response: &Response, trace: bool) {
    let color = match response.solution_type {
        SolutionType::LearnedPattern => Color::Green,
        SolutionType::NewGeneration => Color::Cyan,
    };
    print_colored(&format!("🎯 {} ({})", response.solution_type, response.cognitive_optimization), color);
    println!();
    println!("{}", response.solution);

    if trace {
        let analysis = &response.constraint_analysis;
        println!();
        println!("🧬 Constraint: {} ({})", analysis.constraint_type, analysis.causal_mechanism);
        println!("📈 Reality Alignment: {:.1}%", response.reality_alignment * 100.0);
        println!("⏱️  Processing Time: {:.3}s", response.processing_time);
        println!("🔁 Learning Cycles: {}", response.learning_cycles);
    }
}

/// Show the status counters
pub fn print_status(status: &AgentStatus) {
    println!(">> Agent Statistics:");
    println!("  Total interactions:      {}", status.total_interactions);
    println!("  Patterns learned:        {}", status.learned_patterns);
    println!("  Learning cycles:         {}", status.learning_cycles);
    println!("  Verification time saved: {:.1}s", status.verification_time_saved);
    println!(
        "  Persistence:             {}",
        if status.persistence_available { "enabled" } else { "in-memory only" }
    );
}

/// Show a learning demonstration
pub fn print_learning_report(report: &LearningReport) {
    let estimate = &report.estimate;
    println!("INPUT: {}", report.request);
    println!();
    print_response(&report.response, true);
    println!();
    println!("VERIFICATION TIME ANALYSIS:");
    println!("- Unassisted verification: {:.0} seconds", estimate.baseline_secs);
    println!("- Confirmation with agent: {:.0} seconds", estimate.remaining_secs());
    if estimate.baseline_secs > 0.0 {
        println!(
            "- Time saved: {:.0} seconds ({:.0}% reduction)",
            estimate.saved_secs,
            estimate.saved_secs / estimate.baseline_secs * 100.0
        );
    }
    println!();
    println!("{}", report.message);
    println!();
    println!("- Total interactions: {}", report.status.total_interactions);
    println!("- Patterns learned: {}", report.status.learned_patterns);
    println!("- Cumulative time saved: {:.0} seconds", report.status.verification_time_saved);
}

/// Run the interactive loop until `quit`, Ctrl+D or Ctrl+C
pub fn run_interactive(agent: &mut ConstraintAgent, trace: bool) -> Result<()> {
    println!();
    println!("🌱 INTERACTIVE CONSTRAINT AGENT");
    println!("{}", crate::info());
    println!("Type 'quit' or 'exit' to end the session, 'stats' for statistics");
    println!("{}", "=".repeat(50));

    if !agent.status().persistence_available {
        print_colored("⚠️  Pattern persistence unavailable; learning lasts for this session only", Color::Yellow);
    }

    let mut rl = rustyline::DefaultEditor::new()?;

    loop {
        let line = match rl.readline("\n💬 Your request: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("\n👋 Session ended by user");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("\n👋 Session ended");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(input);

        match input.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "stats" => {
                println!();
                print_status(&agent.status());
                continue;
            }
            _ => {}
        }

        let response = agent.process_request(input);
        println!();
        print_response(&response, trace);

        match rl.readline("\n👍 Was this helpful? (y/n/skip): ") {
            Ok(answer) => match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => {
                    agent.record_feedback(input, &response, true);
                    print_colored("✅ Positive feedback recorded - pattern strengthened", Color::Green);
                }
                "n" | "no" => {
                    agent.record_feedback(input, &response, false);
                    print_colored("📚 Negative feedback recorded - system will adapt", Color::Yellow);
                }
                _ => {}
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n👋 Session ended");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!();
    print_status(&agent.status());
    Ok(())
}
