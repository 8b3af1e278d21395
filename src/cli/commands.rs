//! Shell commands: parsing, interactive prompts, and dispatch.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use strsim::levenshtein;
use tracing::debug;

use crate::{
    errors::LedgerError,
    ledger::{Category, Ledger, Transaction, TransactionKind, TransactionPatch, DATE_FORMAT},
};

use super::{output, render};

const ADD_USAGE: &str = "add [<income|expense> <amount> <category> <note> [yyyy-mm-dd]]";
const SEARCH_USAGE: &str = "search <keyword|type|amount|note> <term>";
const EDIT_USAGE: &str = "edit <id> [field=value ...]";
const DELETE_USAGE: &str = "delete <id>";

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add",
        usage: ADD_USAGE,
        description: "Record a transaction; prompts for fields when called bare",
    },
    CommandSpec {
        name: "list",
        usage: "list",
        description: "Show every transaction, expired ones included",
    },
    CommandSpec {
        name: "stats",
        usage: "stats",
        description: "Totals, net balance, and expenses by category",
    },
    CommandSpec {
        name: "search",
        usage: SEARCH_USAGE,
        description: "Find transactions by keyword, kind, exact amount, or note text",
    },
    CommandSpec {
        name: "edit",
        usage: EDIT_USAGE,
        description: "Change fields of a transaction; prompts when no fields are given",
    },
    CommandSpec {
        name: "delete",
        usage: DELETE_USAGE,
        description: "Remove a transaction by id",
    },
    CommandSpec {
        name: "check",
        usage: "check",
        description: "List transactions past their expiry date",
    },
    CommandSpec {
        name: "save",
        usage: "save",
        description: "Rewrite the ledger file now",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Show this command list",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        description: "Leave the shell",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Run one already-tokenized command line against the ledger.
pub fn dispatch(
    ledger: &mut Ledger,
    command: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    debug!(command, "dispatching");
    match command {
        "add" => add(ledger, args)?,
        "list" | "ls" => list(ledger),
        "stats" => stats(ledger),
        "search" => search(ledger, args)?,
        "edit" => edit(ledger, args)?,
        "delete" | "rm" => delete(ledger, args)?,
        "check" => check(ledger),
        "save" => save(ledger)?,
        "help" => help(),
        "exit" | "quit" => return Ok(LoopControl::Exit),
        other => unknown(other),
    }
    Ok(LoopControl::Continue)
}

struct TransactionDraft {
    amount: f64,
    kind: TransactionKind,
    category: Category,
    note: String,
    expires_on: Option<NaiveDate>,
}

fn add(ledger: &mut Ledger, args: &[&str]) -> Result<(), CommandError> {
    let draft = if args.is_empty() {
        prompt_new_transaction(super::theme())?
    } else {
        parse_add_args(args)?
    };
    let txn = ledger.add(
        draft.amount,
        draft.kind,
        draft.category,
        draft.note,
        draft.expires_on,
    );
    output::success(format!(
        "Recorded {} {:.2} under id {}.",
        txn.kind.label(),
        txn.amount,
        txn.id
    ));
    Ok(())
}

fn list(ledger: &Ledger) {
    output::plain(render::transaction_listing(ledger.transactions()));
}

fn stats(ledger: &Ledger) {
    output::plain(render::statistics_block(&ledger.statistics()));
}

fn search(ledger: &Ledger, args: &[&str]) -> Result<(), CommandError> {
    let Some((mode, rest)) = args.split_first() else {
        return Err(invalid_usage(SEARCH_USAGE));
    };
    if rest.is_empty() {
        return Err(invalid_usage(SEARCH_USAGE));
    }
    let term = rest.join(" ");
    let matches = match *mode {
        "keyword" => ledger.search_by_keyword(&term),
        "type" => ledger.search_by_kind_label(&term),
        "amount" => ledger.search_by_amount(parse_amount(&term)?),
        "note" => ledger.search_by_note(&term),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown search mode `{other}`; expected keyword, type, amount, or note."
            )))
        }
    };
    output::plain(render::search_results(&matches));
    Ok(())
}

fn edit(ledger: &mut Ledger, args: &[&str]) -> Result<(), CommandError> {
    let Some((id_raw, fields)) = args.split_first() else {
        return Err(invalid_usage(EDIT_USAGE));
    };
    let id = parse_id(id_raw)?;
    let Some(current) = ledger.transaction(id) else {
        output::warning(render::not_found(id));
        return Ok(());
    };

    let patch = if fields.is_empty() {
        prompt_patch(super::theme(), current)?
    } else {
        parse_patch_args(fields)?
    };
    if patch.is_empty() {
        output::info("Nothing to change.");
        return Ok(());
    }

    match ledger.update(id, patch) {
        Some(txn) => output::success(format!("Updated: {}", render::transaction_line(txn))),
        None => output::warning(render::not_found(id)),
    }
    Ok(())
}

fn delete(ledger: &mut Ledger, args: &[&str]) -> Result<(), CommandError> {
    let [id_raw] = args else {
        return Err(invalid_usage(DELETE_USAGE));
    };
    let id = parse_id(id_raw)?;
    match ledger.delete(id) {
        Some(txn) => output::success(format!("Deleted: {}", render::transaction_line(&txn))),
        None => output::warning(render::not_found(id)),
    }
    Ok(())
}

fn check(ledger: &Ledger) {
    output::plain(render::expiry_report(&ledger.expired()));
}

fn save(ledger: &mut Ledger) -> Result<(), CommandError> {
    ledger.save()?;
    match ledger.path() {
        Some(path) => output::success(format!("Ledger saved to {}.", path.display())),
        None => output::info("Ledger has no backing file; nothing written."),
    }
    Ok(())
}

fn help() {
    output::section("Commands");
    let width = COMMANDS.iter().map(|spec| spec.usage.len()).max().unwrap_or(0);
    for spec in COMMANDS {
        output::plain(format!("  {:width$}  {}", spec.usage, spec.description));
    }
}

fn unknown(input: &str) {
    output::warning(format!(
        "Unknown command `{input}`. Type `help` to see available commands."
    ));
    if let Some(best) = closest_command(input) {
        output::info(format!("Did you mean `{best}`?"));
    }
}

/// Closest catalog command within an edit distance of 3, if any.
pub fn closest_command(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|spec| (levenshtein(spec.name, input), spec.name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

fn invalid_usage(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}

fn parse_id(raw: &str) -> Result<u64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a transaction id.")))
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a number.")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a valid date; expected yyyy-mm-dd."))
    })
}

fn category_labels() -> Vec<&'static str> {
    Category::ALL.iter().map(|category| category.label()).collect()
}

fn parse_add_args(args: &[&str]) -> Result<TransactionDraft, CommandError> {
    if args.len() < 4 || args.len() > 5 {
        return Err(invalid_usage(ADD_USAGE));
    }
    let kind = TransactionKind::from_label(args[0]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "Unknown transaction type `{}`; expected income or expense.",
            args[0]
        ))
    })?;
    let amount = parse_amount(args[1])?;
    let category = Category::from_label(args[2]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "Unknown category `{}`. Valid categories: {}.",
            args[2],
            category_labels().join(", ")
        ))
    })?;
    let expires_on = match args.get(4) {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };
    Ok(TransactionDraft {
        amount,
        kind,
        category,
        note: args[3].to_string(),
        expires_on,
    })
}

fn parse_patch_args(fields: &[&str]) -> Result<TransactionPatch, CommandError> {
    let mut patch = TransactionPatch::default();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            return Err(CommandError::InvalidArguments(format!(
                "`{field}` is not a field=value pair."
            )));
        };
        match key {
            "amount" => patch.amount = Some(parse_amount(value)?),
            "type" | "kind" => {
                patch.kind = Some(TransactionKind::from_label(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "Unknown transaction type `{value}`; expected income or expense."
                    ))
                })?)
            }
            "category" => {
                patch.category = Some(Category::from_label(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "Unknown category `{value}`. Valid categories: {}.",
                        category_labels().join(", ")
                    ))
                })?)
            }
            "note" => patch.note = Some(value.to_string()),
            "expires" => {
                patch.expires_on = if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    Some(None)
                } else {
                    Some(Some(parse_date(value)?))
                }
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "Unknown field `{other}`; expected amount, type, category, note, or expires."
                )))
            }
        }
    }
    Ok(patch)
}

fn prompt_new_transaction(theme: &ColorfulTheme) -> Result<TransactionDraft, CommandError> {
    let kind_labels: Vec<&str> = TransactionKind::ALL.iter().map(|kind| kind.label()).collect();
    let kind_index = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&kind_labels)
        .default(0)
        .interact()?;
    let kind = TransactionKind::ALL[kind_index];

    let amount = Input::<f64>::with_theme(theme)
        .with_prompt("Amount")
        .interact_text()?;

    let category_index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&category_labels())
        .default(0)
        .interact()?;
    let category = Category::ALL[category_index];

    let note = Input::<String>::with_theme(theme)
        .with_prompt("Note")
        .allow_empty(true)
        .interact_text()?;

    let expires_raw = Input::<String>::with_theme(theme)
        .with_prompt("Expires on (yyyy-mm-dd, empty for none)")
        .allow_empty(true)
        .interact_text()?;
    let expires_on = match expires_raw.trim() {
        "" => None,
        raw => Some(parse_date(raw)?),
    };

    Ok(TransactionDraft {
        amount,
        kind,
        category,
        note,
        expires_on,
    })
}

fn prompt_patch(
    theme: &ColorfulTheme,
    current: &Transaction,
) -> Result<TransactionPatch, CommandError> {
    let mut patch = TransactionPatch::default();

    let amount_raw = Input::<String>::with_theme(theme)
        .with_prompt(format!("Amount [{:.2}]", current.amount))
        .allow_empty(true)
        .interact_text()?;
    if !amount_raw.trim().is_empty() {
        patch.amount = Some(parse_amount(amount_raw.trim())?);
    }

    let mut kind_items = vec![format!("keep {}", current.kind.label())];
    kind_items.extend(TransactionKind::ALL.iter().map(|kind| kind.label().to_string()));
    let kind_index = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&kind_items)
        .default(0)
        .interact()?;
    if kind_index > 0 {
        patch.kind = Some(TransactionKind::ALL[kind_index - 1]);
    }

    let mut category_items = vec![format!("keep {}", current.category.label())];
    category_items.extend(category_labels().iter().map(|label| label.to_string()));
    let category_index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&category_items)
        .default(0)
        .interact()?;
    if category_index > 0 {
        patch.category = Some(Category::ALL[category_index - 1]);
    }

    let note_raw = Input::<String>::with_theme(theme)
        .with_prompt(format!("Note [{}] (empty keeps)", current.note))
        .allow_empty(true)
        .interact_text()?;
    if !note_raw.is_empty() {
        patch.note = Some(note_raw);
    }

    let expiry_label = match current.expires_on {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => "none".to_string(),
    };
    let expires_raw = Input::<String>::with_theme(theme)
        .with_prompt(format!(
            "Expires on [{expiry_label}] (empty keeps, `none` clears)"
        ))
        .allow_empty(true)
        .interact_text()?;
    match expires_raw.trim() {
        "" => {}
        raw if raw.eq_ignore_ascii_case("none") => patch.expires_on = Some(None),
        raw => patch.expires_on = Some(Some(parse_date(raw)?)),
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_parse_with_and_without_expiry() {
        let draft = parse_add_args(&["income", "1000", "wages", "salary", "2026-12-31"]).unwrap();
        assert_eq!(draft.kind, TransactionKind::Income);
        assert_eq!(draft.amount, 1000.0);
        assert_eq!(draft.category, Category::Wages);
        assert_eq!(draft.note, "salary");
        assert_eq!(
            draft.expires_on,
            NaiveDate::from_ymd_opt(2026, 12, 31)
        );

        let open_ended = parse_add_args(&["expense", "12.5", "food", "team lunch"]).unwrap();
        assert_eq!(open_ended.note, "team lunch");
        assert!(open_ended.expires_on.is_none());
    }

    #[test]
    fn add_args_reject_bad_kind_amount_category_and_arity() {
        assert!(parse_add_args(&["transfer", "1", "food", "x"]).is_err());
        assert!(parse_add_args(&["income", "abc", "food", "x"]).is_err());
        assert!(parse_add_args(&["income", "1", "gambling", "x"]).is_err());
        assert!(parse_add_args(&["income", "1"]).is_err());
    }

    #[test]
    fn add_args_accept_non_padded_dates() {
        let draft = parse_add_args(&["income", "1", "wages", "x", "2026-6-1"]).unwrap();
        assert_eq!(draft.expires_on, NaiveDate::from_ymd_opt(2026, 6, 1));
    }

    #[test]
    fn patch_args_set_clear_and_reject_unknown_fields() {
        let patch = parse_patch_args(&["amount=750", "note=dinner", "type=expense"]).unwrap();
        assert_eq!(patch.amount, Some(750.0));
        assert_eq!(patch.note.as_deref(), Some("dinner"));
        assert_eq!(patch.kind, Some(TransactionKind::Expense));
        assert!(patch.expires_on.is_none());

        let cleared = parse_patch_args(&["expires=none"]).unwrap();
        assert_eq!(cleared.expires_on, Some(None));
        let cleared_empty = parse_patch_args(&["expires="]).unwrap();
        assert_eq!(cleared_empty.expires_on, Some(None));

        assert!(parse_patch_args(&["colour=red"]).is_err());
        assert!(parse_patch_args(&["amount"]).is_err());
    }

    #[test]
    fn near_miss_commands_get_a_suggestion() {
        assert_eq!(closest_command("lst"), Some("list"));
        assert_eq!(closest_command("serach"), Some("search"));
        assert_eq!(closest_command("zzzzzzzzzz"), None);
    }
}
