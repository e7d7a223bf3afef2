//! Expense Planner Page
//!
//! Client-side budget planner: set a budget, list planned expenses by
//! category, see totals and what is left. Nothing is sent to the backend.

use leptos::*;
use std::collections::BTreeMap;

use crate::state::use_global_state;

/// A planned expense
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedExpense {
    pub name: String,
    pub category: String,
    pub amount: f64,
}

/// Budget and the expenses planned against it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpensePlan {
    pub budget: f64,
    pub expenses: Vec<PlannedExpense>,
}

impl ExpensePlan {
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            expenses: Vec::new(),
        }
    }

    /// Add an expense. Blank names, non-finite or negative amounts are rejected.
    pub fn add(&mut self, name: &str, category: &str, amount: f64) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Expense name is required".to_string());
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err("Amount must be a non-negative number".to_string());
        }

        let category = match category.trim() {
            "" => "Other",
            c => c,
        };

        self.expenses.push(PlannedExpense {
            name: name.to_string(),
            category: category.to_string(),
            amount,
        });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<PlannedExpense> {
        (index < self.expenses.len()).then(|| self.expenses.remove(index))
    }

    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Budget minus planned spending; negative when over budget
    pub fn remaining(&self) -> f64 {
        self.budget - self.total()
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining() < 0.0
    }

    /// Totals per category, alphabetical
    pub fn by_category(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
        }
        totals
    }
}

#[component]
pub fn ExpensePlanner() -> impl IntoView {
    let state = use_global_state();
    let plan = create_rw_signal(ExpensePlan::default());

    let (name, set_name) = create_signal(String::new());
    let (category, set_category) = create_signal(String::new());
    let (amount, set_amount) = create_signal(String::new());

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let parsed = match amount.get().trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                state.show_error("Amount must be a number");
                return;
            }
        };

        let mut result = Ok(());
        plan.update(|p| result = p.add(&name.get(), &category.get(), parsed));
        match result {
            Ok(()) => {
                set_name.set(String::new());
                set_amount.set(String::new());
            }
            Err(e) => state.show_error(&e),
        }
    };

    view! {
        <div class="space-y-8">
            <div>
                <h2 class="text-2xl font-bold">"Expense Planner"</h2>
                <p class="text-gray-400 mt-1">"Plan spending against a budget"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                <label class="block text-sm text-gray-400">"Budget"</label>
                <input
                    type="number"
                    step="0.01"
                    min="0"
                    prop:value=move || plan.with(|p| p.budget.to_string())
                    on:input=move |ev| {
                        if let Ok(budget) = event_target_value(&ev).parse::<f64>() {
                            plan.update(|p| p.budget = budget);
                        }
                    }
                    class="bg-gray-700 rounded-lg px-4 py-2 border border-gray-600"
                />
            </section>

            <form on:submit=on_add class="bg-gray-800 rounded-xl p-6 grid grid-cols-4 gap-3">
                <input
                    type="text"
                    placeholder="Expense"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-3 py-2"
                />
                <input
                    type="text"
                    placeholder="Category"
                    prop:value=move || category.get()
                    on:input=move |ev| set_category.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-3 py-2"
                />
                <input
                    type="number"
                    step="0.01"
                    placeholder="Amount"
                    prop:value=move || amount.get()
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-3 py-2"
                />
                <button type="submit" class="bg-primary-600 hover:bg-primary-700 rounded-lg font-medium">
                    "Add"
                </button>
            </form>

            <section class="bg-gray-800 rounded-xl p-6">
                <h3 class="text-lg font-semibold mb-3">"Planned expenses"</h3>
                {move || {
                    let expenses = plan.with(|p| p.expenses.clone());
                    if expenses.is_empty() {
                        view! { <p class="text-gray-400">"Nothing planned yet."</p> }.into_view()
                    } else {
                        expenses
                            .into_iter()
                            .enumerate()
                            .map(|(index, expense)| view! {
                                <div class="flex justify-between py-2 border-b border-gray-700">
                                    <span>{expense.name}</span>
                                    <span class="text-gray-400">{expense.category}</span>
                                    <span>{format!("{:.2}", expense.amount)}</span>
                                    <button
                                        on:click=move |_| {
                                            plan.update(|p| {
                                                p.remove(index);
                                            })
                                        }
                                        class="text-red-400 hover:text-red-300"
                                    >
                                        "Remove"
                                    </button>
                                </div>
                            })
                            .collect_view()
                    }
                }}
            </section>

            <section class="bg-gray-800 rounded-xl p-6 space-y-2">
                <h3 class="text-lg font-semibold">"Summary"</h3>
                {move || {
                    plan.with(|p| p.by_category())
                        .into_iter()
                        .map(|(category, total)| view! {
                            <div class="flex justify-between text-sm">
                                <span>{category}</span>
                                <span>{format!("{:.2}", total)}</span>
                            </div>
                        })
                        .collect_view()
                }}
                <div class="flex justify-between font-semibold pt-2">
                    <span>"Total planned"</span>
                    <span>{move || format!("{:.2}", plan.with(|p| p.total()))}</span>
                </div>
                <div class=move || {
                    if plan.with(|p| p.is_over_budget()) {
                        "flex justify-between font-semibold text-red-400"
                    } else {
                        "flex justify-between font-semibold text-green-400"
                    }
                }>
                    <span>"Remaining"</span>
                    <span>{move || format!("{:.2}", plan.with(|p| p.remaining()))}</span>
                </div>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_and_remaining() {
        let mut plan = ExpensePlan::new(100.0);
        plan.add("Groceries", "Food", 40.0).unwrap();
        plan.add("Pizza", "Food", 15.5).unwrap();
        plan.add("Bus pass", "Transport", 20.0).unwrap();

        assert_eq!(plan.total(), 75.5);
        assert_eq!(plan.remaining(), 24.5);
        assert!(!plan.is_over_budget());

        let by_category = plan.by_category();
        assert_eq!(by_category["Food"], 55.5);
        assert_eq!(by_category["Transport"], 20.0);
    }

    #[test]
    fn test_over_budget() {
        let mut plan = ExpensePlan::new(10.0);
        plan.add("Concert", "Fun", 25.0).unwrap();
        assert!(plan.is_over_budget());
        assert_eq!(plan.remaining(), -15.0);
    }

    #[test]
    fn test_rejects_invalid_expenses() {
        let mut plan = ExpensePlan::new(10.0);
        assert!(plan.add("  ", "Food", 1.0).is_err());
        assert!(plan.add("Snack", "Food", -1.0).is_err());
        assert!(plan.add("Snack", "Food", f64::NAN).is_err());
        assert!(plan.expenses.is_empty());
    }

    #[test]
    fn test_blank_category_and_remove() {
        let mut plan = ExpensePlan::new(0.0);
        plan.add("Gift", "", 12.0).unwrap();
        assert_eq!(plan.expenses[0].category, "Other");

        assert_eq!(plan.remove(5), None);
        assert_eq!(plan.remove(0).map(|e| e.name), Some("Gift".to_string()));
        assert_eq!(plan.total(), 0.0);
    }
}
