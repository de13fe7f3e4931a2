//! Branch-sync state machine.
//!
//! ## States
//!
//! ```text
//! Preflight → ResolveDefaultBranch → ResolveCurrentBranch ─┬→ ShortCircuit → Success
//!                                                          └→ DetectDirtyTree
//! DetectDirtyTree ─┬→ Stash → CheckoutDefault
//!                  └→ CheckoutDefault
//! CheckoutDefault → PullDefault → CheckoutFeature → Rebase ─┬→ PopStash → Success
//!                                                           └→ Success
//! ```
//!
//! Every handler returns the next state or a [`SyncError`]. Before a
//! failing handler returns, it runs its compensating commands once each;
//! their failures are logged and reported as info, never returned.

use gitsmart_core::{BranchName, Config, RemoteName};

use crate::error::SyncError;
use crate::git;
use crate::parse;
use crate::report::{Category, Reporter};
use crate::runner::GitRunner;

// ---------------------------------------------------------------------------
// Options and outcomes
// ---------------------------------------------------------------------------

/// Knobs for a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Remote whose `HEAD branch` is the default branch.
    pub remote: RemoteName,
}

impl From<&Config> for SyncOptions {
    fn from(config: &Config) -> Self {
        Self {
            remote: config.remote.clone(),
        }
    }
}

/// What happened to local changes over a full sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashOutcome {
    /// The tree was clean; nothing was stashed.
    NotNeeded,
    /// Stashed changes were popped back onto the rebased branch.
    Restored,
    /// `stash pop` reported there was nothing to restore.
    NothingToRestore,
}

/// Successful end of a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The user was already on the default branch; it was pulled.
    AlreadyOnDefault {
        branch: BranchName,
        pull_output: String,
    },
    /// The feature branch was rebased onto the freshly pulled default branch.
    Synced {
        default_branch: BranchName,
        feature_branch: BranchName,
        stash: StashOutcome,
    },
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// The two branches a run works between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branches {
    pub default: BranchName,
    pub current: BranchName,
}

/// Position in the workflow. `stashed` is the stash flag: local changes
/// were saved by this run and have not been restored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Preflight,
    ResolveDefaultBranch,
    ResolveCurrentBranch { default: BranchName },
    ShortCircuit { branch: BranchName },
    DetectDirtyTree { branches: Branches },
    Stash { branches: Branches },
    CheckoutDefault { branches: Branches, stashed: bool },
    PullDefault { branches: Branches, stashed: bool },
    CheckoutFeature { branches: Branches, stashed: bool },
    Rebase { branches: Branches, stashed: bool },
    PopStash { branches: Branches },
    Success(SyncOutcome),
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Drives [`State`] transitions against a [`GitRunner`], narrating each
/// step to a [`Reporter`].
pub struct SyncWorkflow<'a> {
    git: &'a dyn GitRunner,
    reporter: &'a mut dyn Reporter,
    remote: RemoteName,
}

/// Run a full sync. See [`SyncWorkflow`].
pub fn run(
    git: &dyn GitRunner,
    reporter: &mut dyn Reporter,
    options: &SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    SyncWorkflow::new(git, reporter, options).run()
}

impl<'a> SyncWorkflow<'a> {
    pub fn new(
        git: &'a dyn GitRunner,
        reporter: &'a mut dyn Reporter,
        options: &SyncOptions,
    ) -> Self {
        Self {
            git,
            reporter,
            remote: options.remote.clone(),
        }
    }

    /// Step from [`State::Preflight`] until success or the first fatal error.
    pub fn run(mut self) -> Result<SyncOutcome, SyncError> {
        let mut state = State::Preflight;
        loop {
            state = match self.step(state)? {
                State::Success(outcome) => {
                    self.finish(&outcome);
                    return Ok(outcome);
                }
                next => next,
            };
        }
    }

    /// Perform one transition.
    pub fn step(&mut self, state: State) -> Result<State, SyncError> {
        tracing::info!(?state, "sync step");
        match state {
            State::Preflight => self.preflight(),
            State::ResolveDefaultBranch => self.resolve_default_branch(),
            State::ResolveCurrentBranch { default } => self.resolve_current_branch(default),
            State::ShortCircuit { branch } => self.short_circuit(branch),
            State::DetectDirtyTree { branches } => self.detect_dirty_tree(branches),
            State::Stash { branches } => self.stash(branches),
            State::CheckoutDefault { branches, stashed } => {
                self.checkout_default(branches, stashed)
            }
            State::PullDefault { branches, stashed } => self.pull_default(branches, stashed),
            State::CheckoutFeature { branches, stashed } => {
                self.checkout_feature(branches, stashed)
            }
            State::Rebase { branches, stashed } => self.rebase(branches, stashed),
            State::PopStash { branches } => self.pop_stash(branches),
            State::Success(outcome) => Ok(State::Success(outcome)),
        }
    }

    // -- handlers -----------------------------------------------------------

    fn preflight(&mut self) -> Result<State, SyncError> {
        if !git::is_repository(self.git) {
            self.say(Category::Error, "Error: This is not a git repository.");
            return Err(SyncError::NotARepository);
        }
        Ok(State::ResolveDefaultBranch)
    }

    fn resolve_default_branch(&mut self) -> Result<State, SyncError> {
        self.say(Category::Step, "STEP 0: Determining default branch name...");
        match git::default_branch(self.git, &self.remote) {
            Ok(default) => {
                self.say(
                    Category::Success,
                    &format!("Default branch detected: {default}"),
                );
                Ok(State::ResolveCurrentBranch { default })
            }
            Err(err) => {
                self.say(
                    Category::Error,
                    &format!("Error getting default branch: {err}"),
                );
                Err(err.into())
            }
        }
    }

    fn resolve_current_branch(&mut self, default: BranchName) -> Result<State, SyncError> {
        self.say(Category::Step, "STEP 1: Checking current branch...");
        let current = match git::current_branch(self.git) {
            Ok(current) => current,
            Err(err) => {
                self.say(
                    Category::Error,
                    &format!("Error getting current branch: {err}"),
                );
                return Err(SyncError::BranchResolution(err));
            }
        };

        if current == default {
            self.say(
                Category::Info,
                &format!("You are already on the '{default}' branch. Pulling latest changes..."),
            );
            return Ok(State::ShortCircuit { branch: default });
        }

        self.say(Category::Success, &format!("On feature branch: {current}"));
        Ok(State::DetectDirtyTree {
            branches: Branches { default, current },
        })
    }

    fn short_circuit(&mut self, branch: BranchName) -> Result<State, SyncError> {
        match self.git.run(&["pull"]) {
            Ok(pull_output) => Ok(State::Success(SyncOutcome::AlreadyOnDefault {
                branch,
                pull_output,
            })),
            Err(source) => {
                self.say(
                    Category::Error,
                    &format!("Error pulling '{branch}': {source}"),
                );
                Err(SyncError::Pull { branch, source })
            }
        }
    }

    fn detect_dirty_tree(&mut self, branches: Branches) -> Result<State, SyncError> {
        self.say(Category::Step, "STEP 2: Checking for uncommitted changes...");
        match git::has_local_changes(self.git) {
            Ok(true) => {
                self.say(Category::Info, "Uncommitted changes found. Stashing...");
                Ok(State::Stash { branches })
            }
            Ok(false) => {
                self.say(Category::Success, "No changes to stash.");
                Ok(State::CheckoutDefault {
                    branches,
                    stashed: false,
                })
            }
            Err(err) => {
                self.say(Category::Error, &format!("Error checking status: {err}"));
                Err(SyncError::Status(err))
            }
        }
    }

    fn stash(&mut self, branches: Branches) -> Result<State, SyncError> {
        if let Err(err) = self.git.run(&["stash"]) {
            self.say(Category::Error, &format!("Error stashing changes: {err}"));
            return Err(SyncError::Stash(err));
        }
        self.say(Category::Success, "Changes stashed.");
        Ok(State::CheckoutDefault {
            branches,
            stashed: true,
        })
    }

    fn checkout_default(&mut self, branches: Branches, stashed: bool) -> Result<State, SyncError> {
        let default = &branches.default;
        self.say(
            Category::Step,
            &format!("STEP 3: Checking out '{default}'..."),
        );
        if let Err(source) = self.git.run(&["checkout", default.as_str()]) {
            self.say(
                Category::Error,
                &format!("Error checking out '{default}': {source}"),
            );
            if stashed {
                self.compensate("Attempting to restore stash...", &["stash", "pop"]);
            }
            return Err(SyncError::Checkout {
                branch: branches.default,
                source,
            });
        }
        Ok(State::PullDefault { branches, stashed })
    }

    fn pull_default(&mut self, branches: Branches, stashed: bool) -> Result<State, SyncError> {
        let default = &branches.default;
        self.say(
            Category::Step,
            &format!("STEP 4: Pulling latest changes for '{default}'..."),
        );
        if let Err(source) = self.git.run(&["pull"]) {
            self.say(
                Category::Error,
                &format!("Error pulling '{default}': {source}"),
            );
            self.compensate(
                "Attempting to switch back to your branch...",
                &["checkout", branches.current.as_str()],
            );
            if stashed {
                self.compensate("Attempting to restore stash...", &["stash", "pop"]);
            }
            return Err(SyncError::Pull {
                branch: branches.default,
                source,
            });
        }
        self.say(
            Category::Success,
            &format!("Pulled '{default}' successfully."),
        );
        Ok(State::CheckoutFeature { branches, stashed })
    }

    fn checkout_feature(&mut self, branches: Branches, stashed: bool) -> Result<State, SyncError> {
        let current = &branches.current;
        self.say(
            Category::Step,
            &format!("STEP 5: Checking out feature branch '{current}'..."),
        );
        if let Err(source) = self.git.run(&["checkout", current.as_str()]) {
            self.say(
                Category::Error,
                &format!("Error checking out feature branch '{current}': {source}"),
            );
            if stashed {
                self.compensate(
                    "Attempting to restore stash on default branch...",
                    &["stash", "pop"],
                );
            }
            return Err(SyncError::Checkout {
                branch: branches.current,
                source,
            });
        }
        Ok(State::Rebase { branches, stashed })
    }

    fn rebase(&mut self, branches: Branches, stashed: bool) -> Result<State, SyncError> {
        let default = &branches.default;
        self.say(
            Category::Step,
            &format!("STEP 6: Rebasing '{default}' onto your branch..."),
        );
        if let Err(err) = self.git.run(&["rebase", default.as_str()]) {
            // A stash pop in the middle of a conflicted rebase would make things worse.
            let output = err.message().into_owned();
            self.say(Category::Error, "REBASE FAILED: You have conflicts.");
            self.say(Category::Info, "--- Git Output ---");
            self.say(Category::Info, &output);
            self.say(Category::Info, "-----------------");
            self.say(
                Category::Info,
                "Please fix the conflicts and then run 'git rebase --continue'.",
            );
            if stashed {
                self.say(
                    Category::Info,
                    "Your stashed changes were NOT applied. Run 'git stash pop' after your rebase is complete.",
                );
            }
            return Err(SyncError::RebaseConflict {
                onto: branches.default,
                output,
                stash_kept: stashed,
            });
        }
        self.say(Category::Success, "Rebase successful.");

        if stashed {
            return Ok(State::PopStash { branches });
        }
        Ok(State::Success(SyncOutcome::Synced {
            default_branch: branches.default,
            feature_branch: branches.current,
            stash: StashOutcome::NotNeeded,
        }))
    }

    fn pop_stash(&mut self, branches: Branches) -> Result<State, SyncError> {
        self.say(Category::Step, "STEP 7: Applying stashed changes...");
        let stash = match self.git.run(&["stash", "pop"]) {
            Ok(_) => {
                self.say(Category::Success, "Stashed changes applied.");
                StashOutcome::Restored
            }
            Err(err) if parse::is_benign_stash_pop(&err.message()) => {
                self.say(Category::Success, "Stash was empty or already applied.");
                StashOutcome::NothingToRestore
            }
            Err(err) => {
                let output = err.message().into_owned();
                self.say(
                    Category::Error,
                    "Error popping stash. Your stash is still saved.",
                );
                self.say(Category::Info, &output);
                return Err(SyncError::StashPop { output });
            }
        };
        Ok(State::Success(SyncOutcome::Synced {
            default_branch: branches.default,
            feature_branch: branches.current,
            stash,
        }))
    }

    fn finish(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::AlreadyOnDefault {
                branch,
                pull_output,
            } => {
                self.say(
                    Category::Success,
                    &format!("Successfully pulled '{branch}'. You are up to date."),
                );
                if !pull_output.is_empty() {
                    self.say(Category::Info, pull_output);
                }
            }
            SyncOutcome::Synced { default_branch, .. } => {
                self.say(
                    Category::Success,
                    &format!("✅ All done! Your branch is synced with '{default_branch}'."),
                );
            }
        }
        tracing::info!(?outcome, "sync finished");
    }

    // -- helpers ------------------------------------------------------------

    /// Run a rollback command once. Its failure is reported, not returned.
    fn compensate(&mut self, announcement: &str, args: &[&str]) {
        self.say(Category::Info, announcement);
        if let Err(err) = self.git.run(args) {
            tracing::warn!("rollback `git {}` failed: {err}", args.join(" "));
            self.say(
                Category::Info,
                &format!("Rollback 'git {}' did not succeed: {err}", args.join(" ")),
            );
        }
    }

    fn say(&mut self, category: Category, message: &str) {
        self.reporter.report(category, message);
    }
}
