//! Interactive Session
//!
//! Drives one CLI run: asks for an operation, then for the fields it needs,
//! and calls the repository. Input and output are generic so the same code
//! runs against the terminal and against in-memory buffers in tests.
//!
//! Every answer is one line, trimmed. End of input reads as an empty answer.
//! The first invalid answer ends the run with an error; nothing is retried.

use std::io::{BufRead, Write};

use uuid::Uuid;

use crate::engine::{update_field, MemberRepository};
use crate::error::Result;
use crate::member::{parse_int, parse_weight, Column, Gender, NewMember, Plan, SkillLevel};

pub const OPERATION_PROMPT: &str =
    "What operation you want to do today? (addUser/deleteUser/editUser): ";
pub const ID_PROMPT: &str = "please enter the id: ";
pub const ADD_ANOTHER_PROMPT: &str = "Add another user? (y/n): ";

/// Top-level operations, selected by their exact command names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddUser,
    DeleteUser,
    EditUser,
}

impl Operation {
    /// Match a typed command; unknown commands yield `None`
    #[must_use]
    pub fn from_command(command: &str) -> Option<Self> {
        match command {
            "addUser" => Some(Self::AddUser),
            "deleteUser" => Some(Self::DeleteUser),
            "editUser" => Some(Self::EditUser),
            _ => None,
        }
    }

    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::AddUser => "addUser",
            Self::DeleteUser => "deleteUser",
            Self::EditUser => "editUser",
        }
    }
}

/// Prompt/answer loop over a line-oriented input and an output sink
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink (tests read the transcript from it)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask for an operation and run it
    ///
    /// Returns the operation that ran, or `None` for an unrecognized command,
    /// which is deliberately not an error.
    pub async fn run<M: MemberRepository>(&mut self, repo: &M) -> Result<Option<Operation>> {
        let command = self.prompt(OPERATION_PROMPT)?;

        let Some(operation) = Operation::from_command(&command) else {
            tracing::debug!(%command, "unrecognized operation, nothing to do");
            return Ok(None);
        };

        match operation {
            Operation::AddUser => {
                self.add_users(repo).await?;
            }
            Operation::DeleteUser => {
                self.delete_user(repo).await?;
            }
            Operation::EditUser => {
                self.edit_user(repo).await?;
            }
        }

        Ok(Some(operation))
    }

    /// Insert members until the user stops answering `y`/`Y`
    ///
    /// Returns the ids assigned, in insertion order.
    pub async fn add_users<M: MemberRepository>(&mut self, repo: &M) -> Result<Vec<Uuid>> {
        let mut inserted = Vec::new();

        loop {
            let member = self.read_member()?;
            let id = repo.insert(&member).await?;
            tracing::info!(%id, "member inserted");
            writeln!(self.output, "User inserted successfully with id of {id}!")?;
            inserted.push(id);

            let choice = self.prompt(ADD_ANOTHER_PROMPT)?;
            if choice != "y" && choice != "Y" {
                break;
            }
        }

        writeln!(self.output, "Exiting program.")?;
        Ok(inserted)
    }

    /// Delete one member by id; an unknown id removes nothing and is not an error
    pub async fn delete_user<M: MemberRepository>(&mut self, repo: &M) -> Result<u64> {
        let id = self.read_id()?;
        let removed = repo.delete_by_id(id).await?;
        tracing::debug!(%id, removed, "delete finished");
        Ok(removed)
    }

    /// Change one column of one member
    pub async fn edit_user<M: MemberRepository>(&mut self, repo: &M) -> Result<u64> {
        let id = self.read_id()?;

        writeln!(
            self.output,
            "What value you want to change: (Name, LastName, Age, Height, Weight, SkillLevel, plan, gender)"
        )?;
        let column_name = self.read_answer()?;
        // Reject the column before asking for a value
        column_name.parse::<Column>()?;

        let new_value = self.prompt("What do you want to change it to? ")?;
        let changed = update_field(repo, id, &column_name, &new_value).await?;

        writeln!(self.output, "successfully changed.")?;
        Ok(changed)
    }

    /// Prompt for every member field, validating enums as soon as they are typed
    fn read_member(&mut self) -> Result<NewMember> {
        writeln!(self.output, "Enter new user details:")?;

        let name = self.prompt("Name: ")?;
        let last_name = self.prompt("Last Name: ")?;
        let age = parse_int(&self.prompt("Age: ")?, "age")?;
        let height = parse_int(&self.prompt("Height: ")?, "height")?;
        let weight = parse_weight(&self.prompt("Weight: ")?)?;
        let gender: Gender = self.prompt("Gender: ")?.parse()?;
        let skill_level: SkillLevel =
            self.prompt("Skill Level (Beginner/Intermediate/Master): ")?.parse()?;
        let plan: Plan = self
            .prompt("What plan would you like to choose? (normal/semi-interactive/fully-interactive) :")?
            .parse()?;

        Ok(NewMember { name, last_name, age, height, weight, gender, plan, skill_level })
    }

    fn read_id(&mut self) -> Result<Uuid> {
        let raw = self.prompt(ID_PROMPT)?;
        Ok(Uuid::parse_str(&raw)?)
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_answer()
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
