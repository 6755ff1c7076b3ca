//! Interactive menu loop over a line-based input.
//!
//! Generic over the reader and writer so it can be driven from stdin or from
//! a script in tests.

use std::io::{self, BufRead, Write};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::errors::TreeError;
use crate::tree::Tree;
use crate::tree_traits::TreeRender;

pub const MENU: &str = "Please choose an option. 0 = quit. 1 = insert. 2 = remove. \
                        3 = maximum. 4 = traverse. 5 = show.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Quit,
    Insert,
    Remove,
    Maximum,
    Traverse,
    Show,
}

impl MenuOption {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Quit),
            1 => Some(Self::Insert),
            2 => Some(Self::Remove),
            3 => Some(Self::Maximum),
            4 => Some(Self::Traverse),
            5 => Some(Self::Show),
            _ => None,
        }
    }
}

fn write_err(source: io::Error) -> CliError {
    CliError::io("write session output", source)
}

pub struct Session<R, W> {
    tree: Tree<i64>,
    settings: Settings,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, input: R, out: W) -> Self {
        Self {
            tree: Tree::new(),
            settings,
            input,
            out,
        }
    }

    pub fn tree(&self) -> &Tree<i64> {
        &self.tree
    }

    pub fn into_tree(self) -> Tree<i64> {
        self.tree
    }

    /// Runs until option 0 or end of input.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> CliResult<()> {
        while let Some(option) = self.prompt_option()? {
            debug!(?option, "menu option chosen");
            match option {
                MenuOption::Quit => break,
                MenuOption::Insert => {
                    let Some(value) = self.prompt_number("What value do you want to insert?")?
                    else {
                        break;
                    };
                    self.insert(value)?;
                }
                MenuOption::Remove => {
                    let Some(value) = self.prompt_number("What value do you want to remove?")?
                    else {
                        break;
                    };
                    self.remove(value)?;
                }
                MenuOption::Maximum => self.maximum()?,
                MenuOption::Traverse => self.traverse()?,
                MenuOption::Show => self.show()?,
            }
        }
        Ok(())
    }

    /// Inserts and confirms the value is reachable: held by the root or
    /// found below some parent.
    pub fn insert(&mut self, value: i64) -> CliResult<()> {
        self.tree.insert(value);
        let head_holds = self.tree.head().is_some_and(|h| h.value == value);
        if head_holds || self.tree.find_parent_node(&value).is_some() {
            output::success(&mut self.out, &format!("insert succeeded: {value}")).map_err(write_err)?;
        } else {
            output::failure(&mut self.out, &format!("insert failed: {value}")).map_err(write_err)?;
        }
        self.show_if_configured()
    }

    pub fn remove(&mut self, value: i64) -> CliResult<()> {
        match self.tree.find_node(&value) {
            Some(id) => {
                self.tree.delete_node(id)?;
                output::success(&mut self.out, &format!("removed {value}")).map_err(write_err)?;
            }
            None => {
                output::warning(&mut self.out, &format!("{value} is not in the tree"))
                    .map_err(write_err)?;
            }
        }
        self.show_if_configured()
    }

    pub fn maximum(&mut self) -> CliResult<()> {
        let written = match self.tree.maximum_value() {
            Some(max) => output::action(&mut self.out, "maximum", max),
            None => output::warning(&mut self.out, "tree is empty"),
        };
        written.map_err(write_err)
    }

    pub fn traverse(&mut self) -> CliResult<()> {
        let mode = self.settings.traversal;
        match self.tree.traverse_with(self.tree.root(), mode) {
            Ok(mut values) => {
                let line = values.join(", ");
                output::action(&mut self.out, &mode.to_string(), &line).map_err(write_err)
            }
            Err(TreeError::InvalidState(_)) => {
                output::warning(&mut self.out, "tree is empty").map_err(write_err)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn show(&mut self) -> CliResult<()> {
        let rendered = self.tree.to_tree_string();
        write!(self.out, "{rendered}").map_err(write_err)
    }

    fn show_if_configured(&mut self) -> CliResult<()> {
        if self.settings.show_tree {
            self.show()?;
        }
        Ok(())
    }

    fn prompt_option(&mut self) -> CliResult<Option<MenuOption>> {
        loop {
            output::info(&mut self.out, MENU).map_err(write_err)?;
            let prompt = self.settings.prompt.clone();
            let Some(code) = self.prompt_number(&prompt)? else {
                return Ok(None);
            };
            match MenuOption::from_code(code) {
                Some(option) => return Ok(Some(option)),
                None => output::warning(&mut self.out, &format!("unknown option {code}"))
                    .map_err(write_err)?,
            }
        }
    }

    /// Reads lines until one parses as a number; `None` at end of input.
    fn prompt_number(&mut self, message: &str) -> CliResult<Option<i64>> {
        loop {
            output::prompt(&mut self.out, message).map_err(write_err)?;
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| CliError::io("read session input", e))?;
            if read == 0 {
                writeln!(self.out).map_err(write_err)?;
                return Ok(None);
            }
            match line.trim().parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => output::warning(&mut self.out, &format!("not a number: {:?}", line.trim()))
                    .map_err(write_err)?,
            }
        }
    }
}
