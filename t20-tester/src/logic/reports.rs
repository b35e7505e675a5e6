use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;
use super::summary::{MatchAggregate, MatchRecord};

fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    let passed = u32::try_from(passed).map_or(f64::from(u32::MAX), f64::from);
    let total = u32::try_from(results.len()).map_or(f64::from(u32::MAX), f64::from);
    passed / total * 100.0
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
    aggregate: Option<&MatchAggregate>,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total scenarios: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{} {} (seed {})", status, result.scenario_name.bold(), result.seed)?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
        writeln!(out)?;
    }

    if let Some(agg) = aggregate {
        write_match_summary(out, agg)?;
    }
    Ok(())
}

fn write_match_summary<W: Write + ?Sized>(out: &mut W, agg: &MatchAggregate) -> Result<()> {
    writeln!(out, "{}", "🏏 Match Summary".bright_green().bold())?;
    writeln!(out, "{}", "================".green())?;
    writeln!(out, "Matches: {}", agg.matches)?;
    writeln!(
        out,
        "First innings: {:.1} ± {:.1} runs",
        agg.mean_first_runs, agg.std_first_runs
    )?;
    writeln!(out, "Second innings: {:.1} runs", agg.mean_second_runs)?;
    writeln!(out, "Wickets per innings: {:.2}", agg.mean_wickets)?;
    writeln!(out, "Extras per innings: {:.2}", agg.mean_extras)?;
    writeln!(out, "Chases won: {:.1}%", agg.chase_win_pct * 100.0)?;
    writeln!(out, "Ties: {:.1}%", agg.tie_pct * 100.0)?;
    writeln!(
        out,
        "Highest / lowest total: {} / {}",
        agg.highest_total, agg.lowest_total
    )?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    writeln!(out, "# T20 Engine Logic Test Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {failed_tests}")?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(out, "### {} {} (seed {})\n", status, result.scenario_name, result.seed)?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report<W: Write + ?Sized>(out: &mut W, records: &[MatchRecord]) -> Result<()> {
    writeln!(
        out,
        "seed,first_team,first_runs,first_wickets,first_overs,second_team,second_runs,second_wickets,second_overs,extras,winner,margin,margin_unit,result,player_of_match,draws"
    )?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{:?},{},{:?},{},{},{}",
            r.seed,
            csv_field(&r.first_team),
            r.first_runs,
            r.first_wickets,
            r.first_overs,
            csv_field(&r.second_team),
            r.second_runs,
            r.second_wickets,
            r.second_overs,
            r.extras,
            r.winner,
            r.margin,
            r.margin_unit,
            csv_field(&r.result),
            csv_field(r.player_of_match.as_deref().unwrap_or("")),
            r.draws
        )?;
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use t20_engine::{MarginUnit, Winner};

    fn result(name: &str, passed: bool, millis: u64) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            seed: 7,
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2 (seed 8): boom".to_string()]
            },
            average_duration: Duration::from_millis(millis),
            performance_data: vec![Duration::from_millis(millis)],
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn console_report_lists_failures_and_speed() {
        let results = [result("Smoke Test", true, 3), result("Chase Termination", false, 9)];
        let text = render(|out| generate_console_report(out, &results, None, Duration::ZERO));
        assert!(text.contains("Total scenarios: 2"));
        assert!(text.contains("Success rate: 50.0%"));
        assert!(text.contains("boom"));
        assert!(text.contains("Performance Summary"));
        assert!(!text.contains("Match Summary"));
    }

    #[test]
    fn console_report_includes_match_summary() {
        let agg = MatchAggregate {
            matches: 3,
            mean_first_runs: 151.3,
            std_first_runs: 20.0,
            mean_second_runs: 140.0,
            mean_wickets: 6.5,
            mean_extras: 8.0,
            chase_win_pct: 0.4,
            tie_pct: 0.0,
            highest_total: 201,
            lowest_total: 99,
        };
        let text = render(|out| generate_console_report(out, &[], Some(&agg), Duration::ZERO));
        assert!(text.contains("Match Summary"));
        assert!(text.contains("151.3"));
        assert!(text.contains("201 / 99"));
    }

    #[test]
    fn markdown_report_has_sections() {
        let text = render(|out| generate_markdown_report(out, &[result("Smoke Test", true, 1)]));
        assert!(text.starts_with("# T20 Engine Logic Test Results"));
        assert!(text.contains("### ✅ Smoke Test (seed 7)"));
    }

    #[test]
    fn csv_report_quotes_awkward_fields() {
        let record = MatchRecord {
            seed: 4,
            first_team: "Hawks, North".to_string(),
            first_runs: 150,
            first_wickets: 7,
            first_overs: "20".to_string(),
            second_team: "Owls".to_string(),
            second_runs: 151,
            second_wickets: 6,
            second_overs: "19.3".to_string(),
            extras: 12,
            winner: Winner::SecondInnings,
            margin: 4,
            margin_unit: MarginUnit::Wickets,
            result: "Owls won by 4 wickets".to_string(),
            player_of_match: None,
            draws: 900,
        };
        let text = render(|out| generate_csv_report(out, &[record]));
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("seed,first_team"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("4,\"Hawks, North\",150,7,20,Owls"));
        assert!(row.contains("SecondInnings,4,Wickets,Owls won by 4 wickets,,900"));
    }
}
