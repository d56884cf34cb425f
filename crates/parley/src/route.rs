// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parley route` and `parley classify` command implementations.

use parley_config::model::ParleyConfig;
use parley_core::{ConversationContext, ParleyError};
use parley_router::{AgentMatch, ComplexityResult, RouteOptions, SmartRouter};
use serde::Serialize;

use crate::RouteArgs;

/// Structured classify output for `--json` mode.
#[derive(Debug, Serialize)]
struct Classification {
    agent: AgentMatch,
    complexity: ComplexityResult,
}

/// Run the `parley route` command.
pub fn run_route(config: &ParleyConfig, args: &RouteArgs) -> Result<(), ParleyError> {
    let mut router = SmartRouter::from_config(config);
    if let Some(strategy) = args.strategy {
        router = router.with_strategy(strategy);
    }

    let mut options = RouteOptions::new();
    if let Some(model) = &args.force_model {
        options = options.force_model(model.clone());
    }
    if let Some(provider) = args.force_provider {
        options = options.force_provider(provider);
    }
    if let Some(provider) = args.provider {
        options = options.preferred_provider(provider);
    }

    let context = ConversationContext::from_user(args.message.as_str());
    let decision = router.route(&context, &options)?;

    if args.json {
        println!("{}", crate::to_json(&decision)?);
    } else {
        println!("agent:    {}", decision.agent);
        println!("tier:     {}", decision.tier);
        println!("model:    {}", decision.model);
        println!("strategy: {}", decision.strategy);
        if decision.forced {
            println!("forced:   yes");
        }
        println!("reason:   {}", decision.reason);
    }
    Ok(())
}

/// Run the `parley classify` command.
pub fn run_classify(config: &ParleyConfig, message: &str, json: bool) -> Result<(), ParleyError> {
    let classification = classify(&SmartRouter::from_config(config), message);

    if json {
        println!("{}", crate::to_json(&classification)?);
        return Ok(());
    }

    let Classification { agent, complexity } = classification;
    println!(
        "agent: {} ({}{})",
        agent.kind,
        agent.reason,
        matched(agent.matched_keyword.as_deref())
    );
    println!(
        "tier:  {} ({}{}, {} words)",
        complexity.tier,
        complexity.reason,
        matched(complexity.matched_keyword.as_deref()),
        complexity.word_count
    );
    Ok(())
}

fn classify(router: &SmartRouter, message: &str) -> Classification {
    Classification {
        agent: router.agents().explain(message),
        complexity: router.complexity().classify_text(message),
    }
}

fn matched(keyword: Option<&str>) -> String {
    keyword.map(|k| format!(": \"{k}\"")).unwrap_or_default()
}
