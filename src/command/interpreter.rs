//! Command interpreter - turns a classified prompt into a state change
//!
//! Every mutating branch appends to the event log (which also persists).
//! Queries and rejected commands leave the state untouched.

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use serde::Serialize;

use crate::catalog::Catalogs;
use crate::command::intent::{classify, Intent};
use crate::core::config::DayConfig;
use crate::core::types::{apply_clamped, format_money, Money};
use crate::simulation::day::advance_day;
use crate::state::{SimulationState, StateStore};

/// How a command was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// State changed
    Applied,
    /// Read-only answer
    Query,
    /// Named location (or similar) does not exist
    LookupMiss,
    /// Request refused by a guard such as insufficient funds
    GuardViolation,
    /// Missing or unparseable argument
    ParseFailure,
    /// Prompt not understood
    Fallback,
}

/// Result of interpreting one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub intent: Intent,
    pub kind: OutcomeKind,
    pub response: String,
}

impl CommandOutcome {
    fn new(intent: Intent, kind: OutcomeKind, response: impl Into<String>) -> Self {
        Self {
            intent,
            kind,
            response: response.into(),
        }
    }

    pub fn mutated(&self) -> bool {
        self.kind == OutcomeKind::Applied
    }
}

/// Values drawn once for a scripted action and reused in the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedRoll {
    pub money: Money,
    pub happiness: i64,
    pub population: i64,
    pub cash_invested: Money,
}

impl ScriptedRoll {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            money: rng.gen_range(2_000..=8_000),
            happiness: rng.gen_range(5..=15),
            population: rng.gen_range(10..=100),
            cash_invested: rng.gen_range(50_000..=200_000),
        }
    }
}

pub const HELP_TEXT: &str = "Available commands:
- go to <location> / visit <location> / travel to <location>: move somewhere new
- invest <amount>: move money into investments
- research: spend energy to boost morale
- advance day: collect income and move time forward
- status / check state: show your current situation
- market report: show market indices
- ai prompt: get a suggested business action
- reset / new game: start over
Suggested actions (try 'ai prompt') can be typed directly.";

const RESEARCH_HAPPINESS: i64 = 5;
const RESEARCH_ENERGY_COST: i64 = 10;

static INVEST_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn invest_pattern() -> Option<&'static Regex> {
    INVEST_PATTERN
        .get_or_init(|| Regex::new(r"invest\s+(\d+)").ok())
        .as_ref()
}

/// Dispatches prompts against the store
pub struct Interpreter<'a, R: Rng + ?Sized> {
    store: &'a mut StateStore,
    catalogs: &'a Catalogs,
    day_config: &'a DayConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Interpreter<'a, R> {
    pub fn new(
        store: &'a mut StateStore,
        catalogs: &'a Catalogs,
        day_config: &'a DayConfig,
        rng: &'a mut R,
    ) -> Self {
        Self {
            store,
            catalogs,
            day_config,
            rng,
        }
    }

    /// Interpret one prompt. Never fails: bad input becomes a message.
    pub fn interpret(&mut self, prompt: &str) -> CommandOutcome {
        let lowered = prompt.trim().to_lowercase();
        let intent = classify(&lowered, &self.catalogs.prompts);
        tracing::debug!("Prompt {:?} classified as {:?}", prompt, intent);

        match intent {
            Intent::Travel => self.travel(&lowered),
            Intent::ScriptedAction => self.scripted_action(&lowered),
            Intent::Help => CommandOutcome::new(intent, OutcomeKind::Query, HELP_TEXT),
            Intent::Status => {
                CommandOutcome::new(intent, OutcomeKind::Query, format_status(self.store.get()))
            }
            Intent::AdvanceDay => self.advance_day(),
            Intent::Reset => self.reset(),
            Intent::Invest => self.invest(&lowered),
            Intent::Research => self.research(),
            Intent::MarketReport => CommandOutcome::new(
                intent,
                OutcomeKind::Query,
                self.catalogs.markets.report(),
            ),
            Intent::PromptSuggestion => self.suggest(),
            Intent::Unknown => CommandOutcome::new(
                intent,
                OutcomeKind::Fallback,
                "I didn't understand that. Try: 'go to Tokyo', 'invest 50000', \
                 'advance day', 'status', 'market report' or 'help'.",
            ),
        }
    }

    fn travel(&mut self, lowered: &str) -> CommandOutcome {
        let target = travel_target(lowered);
        let Some(location) = self.catalogs.locations.find_by_fragment(target) else {
            return CommandOutcome::new(
                Intent::Travel,
                OutcomeKind::LookupMiss,
                format!(
                    "Unknown location '{}'. Valid locations: {}",
                    target,
                    self.catalogs.locations.names().join(", ")
                ),
            );
        };

        self.store.state_mut().location = location.name.clone();
        self.store
            .append_event(&format!("Travelled to {}", location.name));

        CommandOutcome::new(
            Intent::Travel,
            OutcomeKind::Applied,
            format!(
                "Welcome to {}! {} The weather is {}.",
                location.name,
                location.description,
                location.weather.label()
            ),
        )
    }

    fn scripted_action(&mut self, lowered: &str) -> CommandOutcome {
        let Some(action) = self.catalogs.prompts.matching_action(lowered) else {
            return CommandOutcome::new(
                Intent::ScriptedAction,
                OutcomeKind::Fallback,
                "That action is not available.",
            );
        };

        let roll = ScriptedRoll::sample(self.rng);
        {
            let state = self.store.state_mut();
            state.money = state.money.saturating_add(roll.money);
            state.happiness = apply_clamped(state.happiness, roll.happiness);
            state.population = state.population.saturating_add(roll.population);
            state.cash_invested = state.cash_invested.saturating_add(roll.cash_invested);
        }
        self.store
            .append_event(&format!("Executed action: {}", action));

        CommandOutcome::new(
            Intent::ScriptedAction,
            OutcomeKind::Applied,
            format!(
                "Executed '{}'. Revenue +${}, happiness +{}, population +{}, \
                 ${} committed to investments.",
                action,
                format_money(roll.money),
                roll.happiness,
                roll.population,
                format_money(roll.cash_invested)
            ),
        )
    }

    fn advance_day(&mut self) -> CommandOutcome {
        let report = advance_day(self.store, self.day_config, self.rng);
        let money_line = if report.income >= 0 {
            format!("Income: +${}", format_money(report.income))
        } else {
            format!("Expenses: -${}", format_money(report.income.saturating_neg()))
        };

        CommandOutcome::new(
            Intent::AdvanceDay,
            OutcomeKind::Applied,
            format!(
                "Day {} begins. {}. Energy -{}.",
                report.new_day, money_line, report.energy_lost
            ),
        )
    }

    fn reset(&mut self) -> CommandOutcome {
        let state = self.store.reset();
        CommandOutcome::new(
            Intent::Reset,
            OutcomeKind::Applied,
            format!(
                "Game reset. You are in {} with ${}.",
                state.location,
                format_money(state.money)
            ),
        )
    }

    fn invest(&mut self, lowered: &str) -> CommandOutcome {
        let Some(digits) = invest_pattern()
            .and_then(|re| re.captures(lowered))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return CommandOutcome::new(
                Intent::Invest,
                OutcomeKind::ParseFailure,
                "How much would you like to invest? Try 'invest 50000'.",
            );
        };

        let Ok(amount) = digits.parse::<Money>() else {
            return CommandOutcome::new(
                Intent::Invest,
                OutcomeKind::ParseFailure,
                format!(
                    "'{}' is not an amount I can invest. Try 'invest 50000'.",
                    digits
                ),
            );
        };

        let balance = self.store.get().money;
        if amount > balance {
            return CommandOutcome::new(
                Intent::Invest,
                OutcomeKind::GuardViolation,
                format!(
                    "Insufficient funds: you have ${} but tried to invest ${}.",
                    format_money(balance),
                    format_money(amount)
                ),
            );
        }

        let (remaining, total) = {
            let state = self.store.state_mut();
            state.money = state.money.saturating_sub(amount);
            state.cash_invested = state.cash_invested.saturating_add(amount);
            (state.money, state.cash_invested)
        };
        self.store
            .append_event(&format!("Invested ${}", format_money(amount)));

        CommandOutcome::new(
            Intent::Invest,
            OutcomeKind::Applied,
            format!(
                "Invested ${}. Total invested: ${}. Remaining balance: ${}.",
                format_money(amount),
                format_money(total),
                format_money(remaining)
            ),
        )
    }

    /// Happiness and energy are not clamped here
    fn research(&mut self) -> CommandOutcome {
        let topic = self
            .catalogs
            .prompts
            .random_research_topic(self.rng)
            .unwrap_or("new technology")
            .to_string();
        {
            let state = self.store.state_mut();
            state.happiness = state.happiness.saturating_add(RESEARCH_HAPPINESS);
            state.energy = state.energy.saturating_sub(RESEARCH_ENERGY_COST);
        }
        self.store
            .append_event(&format!("Completed research on {}", topic));

        CommandOutcome::new(
            Intent::Research,
            OutcomeKind::Applied,
            format!(
                "Research on {} complete. Happiness +{}, energy -{}.",
                topic, RESEARCH_HAPPINESS, RESEARCH_ENERGY_COST
            ),
        )
    }

    fn suggest(&mut self) -> CommandOutcome {
        let response = match self.catalogs.prompts.random_suggestion(self.rng) {
            Some(suggestion) => format!("Try this: {}", suggestion),
            None => "No suggestions available right now.".to_string(),
        };
        CommandOutcome::new(Intent::PromptSuggestion, OutcomeKind::Query, response)
    }
}

/// Text after "go to", otherwise the last word; surrounding punctuation dropped
pub fn travel_target(lowered: &str) -> &str {
    let raw = match lowered.find("go to") {
        Some(idx) => &lowered[idx + "go to".len()..],
        None => lowered.split_whitespace().last().unwrap_or(""),
    };
    raw.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
}

/// Multi-line snapshot for the status command
pub fn format_status(state: &SimulationState) -> String {
    format!(
        "Day {} in {}\n\
         Money: ${}\n\
         Population: {}\n\
         Happiness: {}/100\n\
         Energy: {}/100\n\
         Security: {}/100\n\
         Invested: ${}\n\
         Dividends: ${}",
        state.day,
        state.location,
        format_money(state.money),
        format_money(state.population),
        state.happiness,
        state.energy,
        state.security,
        format_money(state.cash_invested),
        format_money(state.dividends_received)
    )
}
