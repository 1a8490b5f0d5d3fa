use anyhow::{bail, Result};
use serde::Serialize;

use patacho_core::{AppConfig, PageSession, Viewport};

#[derive(Debug, Serialize)]
struct RevealRow {
    section: String,
    /// Scroll offset at which the section first met the threshold
    offset: f64,
    top: f64,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    viewport_width: f64,
    viewport_height: f64,
    document_height: f64,
    max_scroll: f64,
    threshold: f64,
    reveals: Vec<RevealRow>,
    never_revealed: Vec<String>,
    /// Every revealed section is still revealed after scrolling back to the top
    persisted_after_return: bool,
}

pub fn run(config: &AppConfig, step: f64, width: f64, height: f64, json: bool) -> Result<()> {
    let report = simulate(config, step, width, height)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Viewport {}x{}, document {}px, threshold {}\n",
        report.viewport_width, report.viewport_height, report.document_height, report.threshold
    );
    for row in &report.reveals {
        println!("  {:>7.0}px  {} (top {:.0}px)", row.offset, row.section, row.top);
    }
    for id in &report.never_revealed {
        println!("    never  {}", id);
    }
    println!(
        "\nBack at the top: {}",
        if report.persisted_after_return {
            "all revealed sections stay visible"
        } else {
            "some sections were hidden again"
        }
    );
    Ok(())
}

fn simulate(config: &AppConfig, step: f64, width: f64, height: f64) -> Result<SimulationReport> {
    if !step.is_finite() || step <= 0.0 {
        bail!("--step must be a positive number, got {}", step);
    }
    if !(width > 0.0 && height > 0.0) {
        bail!("viewport must have a positive size, got {}x{}", width, height);
    }

    let (mut session, mount) = PageSession::new(config, Viewport::new(width, height))?;
    let max_scroll = session.layout().max_scroll();
    let top_of = |session: &PageSession, id: &str| session.layout().section_top(id).unwrap_or(0.0);

    let mut reveals: Vec<RevealRow> = mount
        .registered
        .iter()
        .filter(|id| session.is_revealed(id.as_str()))
        .map(|id| RevealRow {
            section: id.to_string(),
            offset: 0.0,
            top: top_of(&session, id.as_str()),
        })
        .collect();

    let mut offset = 0.0;
    while offset < max_scroll {
        offset = (offset + step).min(max_scroll);
        for id in session.scroll_to(offset) {
            reveals.push(RevealRow {
                top: top_of(&session, id.as_str()),
                section: id.to_string(),
                offset,
            });
        }
    }

    session.scroll_to(0.0);
    let persisted_after_return = reveals.iter().all(|row| session.is_revealed(&row.section));

    let never_revealed = mount
        .registered
        .iter()
        .filter(|id| !session.is_revealed(id.as_str()))
        .map(|id| id.to_string())
        .collect();

    let report = SimulationReport {
        viewport_width: width,
        viewport_height: height,
        document_height: session.layout().document_height(),
        max_scroll,
        threshold: session.tracker().threshold(),
        reveals,
        never_revealed,
        persisted_after_return,
    };
    session.dispose();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_sweep_reveals_everything_in_order() {
        let report = simulate(&AppConfig::default(), 100.0, 1280.0, 800.0).unwrap();
        let order: Vec<&str> = report.reveals.iter().map(|r| r.section.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "historia",
                "evento",
                "recepcao-boas-vindas",
                "hospedagem",
                "aproveitar-patacho",
                "presentes",
                "como-chegar",
                "confirmacao",
            ]
        );
        assert!(report.never_revealed.is_empty());
        assert!(report.persisted_after_return);
        // 110px of historia is needed; the first step past 210 is 300
        assert_eq!(report.reveals[0].offset, 300.0);
    }

    #[test]
    fn test_rejects_bad_step() {
        assert!(simulate(&AppConfig::default(), 0.0, 1280.0, 800.0).is_err());
        assert!(simulate(&AppConfig::default(), f64::NAN, 1280.0, 800.0).is_err());
    }

    #[test]
    fn test_coarse_step_skips_sections() {
        // One jump straight to the bottom
        let report = simulate(&AppConfig::default(), 50_000.0, 1280.0, 800.0).unwrap();
        assert_eq!(report.max_scroll, 9800.0);

        let revealed: Vec<&str> = report.reveals.iter().map(|r| r.section.as_str()).collect();
        assert_eq!(revealed.len(), 2);
        assert!(revealed.contains(&"como-chegar"));
        assert!(revealed.contains(&"confirmacao"));
        assert!(report.reveals.iter().all(|r| r.offset == 9800.0));
        assert_eq!(report.never_revealed.len(), 6);
        assert!(report.persisted_after_return);
    }
}
