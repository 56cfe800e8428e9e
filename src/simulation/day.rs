//! Day advancement - one tick of passive income and fatigue

use rand::Rng;
use serde::Serialize;

use crate::core::config::{DayConfig, IncomeModel};
use crate::core::types::{apply_clamped, format_money, Day, Money};
use crate::state::StateStore;

/// What one tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub new_day: Day,
    /// Net money change; negative means expenses
    pub income: Money,
    pub energy_lost: i64,
    /// Always 0 for the formula model
    pub happiness_change: i64,
}

/// Advance the day by exactly one
pub fn advance_day<R: Rng + ?Sized>(
    store: &mut StateStore,
    config: &DayConfig,
    rng: &mut R,
) -> DayReport {
    let energy_lost = rng.gen_range(config.energy_drop_min..=config.energy_drop_max);

    let report = {
        let state = store.state_mut();
        state.day = state.day.saturating_add(1);

        match config.income_model {
            IncomeModel::Formula => {
                let income = formula_income(
                    state.population,
                    state.cash_invested,
                    config.population_income,
                    config.investment_yield,
                );
                state.money = state.money.saturating_add(income);
                state.energy = state.energy.saturating_sub(energy_lost);
                DayReport {
                    new_day: state.day,
                    income,
                    energy_lost,
                    happiness_change: 0,
                }
            }
            IncomeModel::Legacy => {
                let income = rng.gen_range(config.legacy_money_min..=config.legacy_money_max);
                let swing = config.legacy_happiness_swing;
                let happiness_change = rng.gen_range(-swing..=swing);

                state.money = state.money.saturating_add(income);
                state.happiness = apply_clamped(state.happiness, happiness_change);
                state.energy = state.energy.saturating_sub(energy_lost).max(0);
                DayReport {
                    new_day: state.day,
                    income,
                    energy_lost,
                    happiness_change,
                }
            }
        }
    };

    tracing::debug!(
        "Advanced to day {} (income {:+}, energy -{})",
        report.new_day,
        report.income,
        report.energy_lost
    );

    let summary = if report.income >= 0 {
        format!("Day advanced: income +${}", format_money(report.income))
    } else {
        format!("Day advanced: expenses -${}", format_money(report.income.saturating_neg()))
    };
    store.append_event(&summary);

    report
}

/// `population * per_head + floor(cash_invested * yield)`
pub fn formula_income(
    population: i64,
    cash_invested: Money,
    per_head: i64,
    yield_rate: f64,
) -> Money {
    let from_population = population.saturating_mul(per_head);
    let from_investments = (cash_invested as f64 * yield_rate).floor() as i64;
    from_population.saturating_add(from_investments)
}
