// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The condition registry: owns the condition graph built from a
//! configuration document and hands out non-owning handles.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, Local};
use thiserror::Error;
use tokio::task::JoinSet;

use gtm_conditional::{
    signal, CompositeCondition, CompositeError, Condition, CutOffCondition, DelayedCondition,
    Dereference, Executor, Inverse, ManualCondition, Operator, Signal, SignalSender,
    TimeCondition,
};
use gtm_executor::{CommandExecutor, ConstExecutor, HttpExecutor};
use gtm_time::RecurrentMoment;
use gtm_trigger::{watch, Action, CommandAction, Trigger, WatchError};

use crate::decl::{ActionDecl, ConditionDecl, ConditionKind, Document, ExecutorDecl, TriggerDecl};
use crate::timefmt::{self, ParseTimeError};

/// Errors building a registry from a configuration document. All of them
/// are structural and surface before any trigger watch starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("a condition named \"{0}\" already exists")]
    DuplicateCondition(String),
    #[error("no condition found with the name \"{0}\"")]
    UnknownCondition(String),
    #[error(transparent)]
    Composite(#[from] CompositeError),
    #[error(transparent)]
    Time(#[from] ParseTimeError),
    #[error("invalid executor: {0}")]
    Executor(String),
    #[error("a command is mandatory for command actions")]
    MissingCommand,
}

struct ConditionTrigger {
    name: Option<String>,
    condition: Arc<dyn Condition>,
    trigger: Trigger,
}

/// A named collection of conditions and the triggers watching them.
///
/// The registry owns every condition it builds; [`Registry::get`] hands out
/// [`Dereference`] wrappers so holders cannot close the graph underneath
/// it. [`Registry::close`] tears everything down.
#[derive(Default)]
pub struct Registry {
    conditions: Mutex<HashMap<String, Arc<dyn Condition>>>,
    anonymous: Mutex<Vec<Arc<dyn Condition>>>,
    triggers: Mutex<Vec<ConditionTrigger>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a YAML (or JSON) document.
    pub async fn load(document: &str) -> Result<Self, ConfigError> {
        let document: Document = serde_yaml::from_str(document)?;
        Self::from_document(document).await
    }

    /// Build a registry from a parsed document.
    pub async fn from_document(document: Document) -> Result<Self, ConfigError> {
        let registry = Self::new();
        let offset = *Local::now().offset();

        for decl in &document.conditions {
            let condition = registry.build_condition(decl, offset).await?;

            if decl_name(decl).is_none() {
                registry
                    .anonymous
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(condition);
            }
        }

        for decl in &document.triggers {
            let trigger = registry.build_trigger(decl, offset).await?;
            registry
                .triggers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(trigger);
        }

        Ok(registry)
    }

    /// Return a non-owning handle on a named condition.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Condition>> {
        let conditions = self.conditions.lock().unwrap_or_else(|e| e.into_inner());

        conditions
            .get(name)
            .map(|condition| Arc::new(Dereference::new(condition.clone())) as Arc<dyn Condition>)
    }

    /// Add a named condition, transferring ownership to the registry.
    pub fn add(
        &self,
        name: impl Into<String>,
        condition: Arc<dyn Condition>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        let mut conditions = self.conditions.lock().unwrap_or_else(|e| e.into_inner());

        if conditions.contains_key(&name) {
            return Err(ConfigError::DuplicateCondition(name));
        }

        conditions.insert(name, condition);
        Ok(())
    }

    /// Watch every declared trigger until `shutdown` releases or a watch
    /// fails. The first failure wins; remaining watches are cancelled on
    /// the way out.
    pub async fn watch(&self, mut shutdown: Signal) -> Result<(), WatchError> {
        let mut watches = JoinSet::new();
        let mut stops: Vec<SignalSender> = Vec::new();

        {
            let triggers = self.triggers.lock().unwrap_or_else(|e| e.into_inner());

            for entry in triggers.iter() {
                let (stop, cancel) = signal::pair();
                stops.push(stop);

                let name = entry.name.clone();
                let condition = entry.condition.clone();
                let trigger = entry.trigger.clone();

                watches.spawn(async move {
                    watch(name.as_deref(), &*condition, &trigger, cancel).await
                });
            }
        }

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    for stop in stops.drain(..) {
                        stop.release();
                    }

                    while watches.join_next().await.is_some() {}
                    return Ok(());
                }

                joined = watches.join_next() => {
                    match joined {
                        // Every watch finished; nothing left to supervise.
                        None => return Ok(()),
                        Some(Ok(Ok(()))) => {}
                        Some(Ok(Err(error))) => return Err(error),
                        Some(Err(join_error)) => {
                            tracing::error!(%join_error, "watch task aborted");
                        }
                    }
                }
            }
        }
    }

    /// Close every condition owned by the registry.
    pub fn close(&self) {
        let mut conditions = self.conditions.lock().unwrap_or_else(|e| e.into_inner());

        for condition in conditions.values() {
            condition.close();
        }
        conditions.clear();

        let mut anonymous = self.anonymous.lock().unwrap_or_else(|e| e.into_inner());

        for condition in anonymous.drain(..) {
            condition.close();
        }

        // Trigger conditions are either dereferenced handles (their owner
        // was just closed above) or anonymous inline conditions.
        let mut triggers = self.triggers.lock().unwrap_or_else(|e| e.into_inner());

        for entry in triggers.drain(..) {
            entry.condition.close();
        }
    }

    fn build_condition<'a>(
        &'a self,
        decl: &'a ConditionDecl,
        offset: FixedOffset,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<dyn Condition>, ConfigError>> + Send + 'a>> {
        Box::pin(async move {
            let inline = match decl {
                ConditionDecl::Reference(name) => {
                    return self
                        .get(name)
                        .ok_or_else(|| ConfigError::UnknownCondition(name.clone()));
                }
                ConditionDecl::Inline(inline) => inline,
            };

            let condition: Arc<dyn Condition> = match &inline.kind {
                ConditionKind::Manual { state } => Arc::new(ManualCondition::new(*state)),

                ConditionKind::Inverse { condition } => {
                    Arc::new(Inverse::new(self.build_condition(condition, offset).await?))
                }

                ConditionKind::Delay { condition, delay } => Arc::new(DelayedCondition::new(
                    self.build_condition(condition, offset).await?,
                    *delay,
                )),

                ConditionKind::And { conditions } => {
                    self.build_composite(Operator::And, conditions, offset).await?
                }
                ConditionKind::Or { conditions } => {
                    self.build_composite(Operator::Or, conditions, offset).await?
                }
                ConditionKind::Xor { conditions } => {
                    self.build_composite(Operator::Xor, conditions, offset).await?
                }

                ConditionKind::Time {
                    start,
                    stop,
                    frequency,
                } => {
                    let start = timefmt::parse_time(start, offset)?;
                    let stop = timefmt::parse_time(stop, offset)?;

                    Arc::new(TimeCondition::new(RecurrentMoment::new(
                        start, stop, *frequency,
                    )))
                }

                ConditionKind::CutOff {
                    up,
                    down,
                    period,
                    executor,
                } => {
                    let executor = build_executor(executor.as_ref())?;
                    Arc::new(CutOffCondition::new(*up, *down, *period, executor).await)
                }
            };

            if let Some(name) = &inline.name {
                self.add(name.clone(), condition.clone())?;
                Ok(Arc::new(Dereference::new(condition)) as Arc<dyn Condition>)
            } else {
                Ok(condition)
            }
        })
    }

    async fn build_composite(
        &self,
        operator: Operator,
        declarations: &[ConditionDecl],
        offset: FixedOffset,
    ) -> Result<Arc<dyn Condition>, ConfigError> {
        let mut subconditions = Vec::with_capacity(declarations.len());

        for declaration in declarations {
            subconditions.push(self.build_condition(declaration, offset).await?);
        }

        Ok(Arc::new(
            CompositeCondition::new(operator, subconditions).await?,
        ))
    }

    async fn build_trigger(
        &self,
        decl: &TriggerDecl,
        offset: FixedOffset,
    ) -> Result<ConditionTrigger, ConfigError> {
        let name = decl_name(&decl.condition);
        let condition = self.build_condition(&decl.condition, offset).await?;

        let trigger = Trigger {
            up: build_action(decl.up.as_ref())?,
            down: build_action(decl.down.as_ref())?,
        };

        Ok(ConditionTrigger {
            name,
            condition,
            trigger,
        })
    }
}

fn decl_name(decl: &ConditionDecl) -> Option<String> {
    match decl {
        ConditionDecl::Reference(name) => Some(name.clone()),
        ConditionDecl::Inline(inline) => inline.name.clone(),
    }
}

fn build_executor(decl: Option<&ExecutorDecl>) -> Result<Arc<dyn Executor>, ConfigError> {
    match decl {
        None => Ok(Arc::new(ConstExecutor(false))),

        Some(ExecutorDecl::Cmd { command, args, .. }) => {
            Ok(Arc::new(CommandExecutor::new(command.clone(), args.clone())))
        }

        Some(ExecutorDecl::Http {
            method,
            url,
            status_codes,
            timeout,
        }) => {
            let executor =
                HttpExecutor::new(method.clone(), url.clone(), status_codes.clone(), *timeout)
                    .map_err(|error| ConfigError::Executor(error.to_string()))?;

            Ok(Arc::new(executor))
        }
    }
}

fn build_action(decl: Option<&ActionDecl>) -> Result<Option<Arc<dyn Action>>, ConfigError> {
    let Some(ActionDecl::Command { command, args, env }) = decl else {
        return Ok(None);
    };

    if command.is_empty() {
        return Err(ConfigError::MissingCommand);
    }

    // Declared variables extend the daemon's own environment, so actions
    // see a regular shell environment plus their overrides.
    let mut full_env: Vec<(String, String)> = std::env::vars().collect();
    full_env.extend(env.iter().map(|(key, value)| (key.clone(), value.clone())));

    Ok(Some(Arc::new(CommandAction::new(
        command.clone(),
        args.clone(),
        full_env,
    ))))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
