use scentwise_core::config::AppConfig;
use scentwise_core::domain::product::ScentProduct;
use scentwise_core::scent::{calculate_complementary_score, calculate_scent_compatibility};
use serde::Serialize;

use super::context::{load_config, load_products};
use super::CommandResult;

const EXIT_UNHEALTHY: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_UNHEALTHY };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match load_config() {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match load_products(&config) {
                Ok((products, source)) => {
                    checks.push(check_catalog(&products, &source));
                    checks.push(check_scoring(&config, &products));
                }
                Err((_, message, _)) => {
                    checks.push(DoctorCheck {
                        name: "catalog_load",
                        status: CheckStatus::Fail,
                        details: message,
                    });
                    checks.push(skipped("scoring_self_check", "catalog did not load"));
                }
            }
        }
        Err((_, message, _)) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: message,
            });
            checks.push(skipped("catalog_load", "configuration did not load"));
            checks.push(skipped("scoring_self_check", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck { name, status: CheckStatus::Skipped, details: format!("skipped because {reason}") }
}

fn check_catalog(products: &[ScentProduct], source: &str) -> DoctorCheck {
    let active = products.iter().filter(|product| product.active).count();
    let invalid: Vec<&str> = products
        .iter()
        .filter(|product| product.profile.validate().is_err())
        .map(|product| product.id.as_str())
        .collect();

    if active == 0 {
        return DoctorCheck {
            name: "catalog_load",
            status: CheckStatus::Fail,
            details: format!("{source} catalog has no active products"),
        };
    }

    let mut details =
        format!("{} products from {source} catalog ({active} active)", products.len());
    if !invalid.is_empty() {
        details.push_str(&format!("; skipped at query time: {}", invalid.join(", ")));
    }

    DoctorCheck { name: "catalog_load", status: CheckStatus::Pass, details }
}

/// A valid profile must be a perfect match for itself, and every pairing must stay in range.
fn check_scoring(config: &AppConfig, products: &[ScentProduct]) -> DoctorCheck {
    let weights = &config.recommendations.weights;
    let valid: Vec<&ScentProduct> =
        products.iter().filter(|product| product.profile.validate().is_ok()).collect();

    let Some(probe) = valid.first() else {
        return DoctorCheck {
            name: "scoring_self_check",
            status: CheckStatus::Fail,
            details: "no valid scent profiles to score".to_string(),
        };
    };

    let self_score = calculate_scent_compatibility(&probe.profile, &probe.profile, weights);
    if self_score != 100 {
        return DoctorCheck {
            name: "scoring_self_check",
            status: CheckStatus::Fail,
            details: format!("`{}` scored {self_score} against itself", probe.id),
        };
    }

    let out_of_range = valid.iter().find(|candidate| {
        calculate_scent_compatibility(&probe.profile, &candidate.profile, weights) > 100
            || calculate_complementary_score(&probe.profile, &candidate.profile) > 100
    });
    if let Some(candidate) = out_of_range {
        return DoctorCheck {
            name: "scoring_self_check",
            status: CheckStatus::Fail,
            details: format!("`{}` vs `{}` scored outside 0..=100", probe.id, candidate.id),
        };
    }

    DoctorCheck {
        name: "scoring_self_check",
        status: CheckStatus::Pass,
        details: format!("scored `{}` against {} valid profiles", probe.id, valid.len()),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
