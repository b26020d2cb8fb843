use anyhow::Result;
use chrono::SecondsFormat;
use eventd::prelude::*;
use eventd_lifecycle::{EventHandler, Lifecycle, LifecycleConfig};
use std::collections::HashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum AccountError {
    #[error("account already opened: {0}")]
    AlreadyOpened(String),
    #[error("account not opened: {0}")]
    NotOpened(String),
    #[error("insufficient funds: balance={balance}, requested={requested}")]
    InsufficientFunds { balance: i64, requested: i64 },
}

#[derive(Debug)]
enum AccountCommand {
    Open { initial_balance: i64 },
    Deposit { amount: i64 },
    Withdraw { amount: i64 },
}

#[derive(Debug, Clone, EventBody)]
#[event_body(name = "account.opened")]
struct AccountOpened {
    id: String,
    initial_balance: i64,
}

#[derive(Debug, Clone, EventBody)]
#[event_body(name = "account.deposited")]
struct MoneyDeposited {
    id: String,
    amount: i64,
}

#[derive(Debug, Clone, EventBody)]
#[event_body(name = "account.withdrawn")]
struct MoneyWithdrawn {
    id: String,
    amount: i64,
}

#[derive(Debug, Clone)]
struct Account {
    id: String,
    balance: i64,
}

impl Account {
    // 执行命令：变更状态并通过上下文中的发布能力抛出领域事件
    fn execute(&mut self, ctx: &Context, command: AccountCommand) -> Result<()> {
        let publisher = eventd::require_publisher(ctx)?;
        match command {
            AccountCommand::Open { .. } => {
                return Err(AccountError::AlreadyOpened(self.id.clone()).into());
            }
            AccountCommand::Deposit { amount } => {
                self.balance += amount;
                publisher.publish_body(MoneyDeposited {
                    id: self.id.clone(),
                    amount,
                });
            }
            AccountCommand::Withdraw { amount } => {
                // 先发布再校验：失败时事件随生命周期一起被丢弃
                publisher.publish_body(MoneyWithdrawn {
                    id: self.id.clone(),
                    amount,
                });
                if self.balance < amount {
                    return Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: amount,
                    }
                    .into());
                }
                self.balance -= amount;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct AccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl AccountRepository {
    fn load(&self, id: &str) -> Option<Account> {
        self.accounts.lock().get(id).cloned()
    }

    fn save(&self, account: Account) -> Result<()> {
        self.accounts.lock().insert(account.id.clone(), account);
        Ok(())
    }
}

/// 应用服务：每条命令是一个工作单元
struct AccountService {
    repo: AccountRepository,
    integration: Arc<dyn EventHandler>,
}

impl AccountService {
    fn handle(&self, id: &str, command: AccountCommand) -> Result<()> {
        let label = format!("{id}:{command:?}");
        let cfg = LifecycleConfig::builder().label(label).build();

        Lifecycle::with_config(Some(self.integration.clone()), cfg).run(|ctx| {
            let account = match (self.repo.load(id), command) {
                (None, AccountCommand::Open { initial_balance }) => {
                    eventd::require_publisher(ctx)?.publish_body(AccountOpened {
                        id: id.to_string(),
                        initial_balance,
                    });
                    Account {
                        id: id.to_string(),
                        balance: initial_balance,
                    }
                }
                (None, _) => return Err(AccountError::NotOpened(id.to_string()).into()),
                (Some(mut account), command) => {
                    account.execute(ctx, command)?;
                    account
                }
            };
            self.repo.save(account)
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,eventd_lifecycle=debug")),
        )
        .init();

    // 对外的集成事件总线：只接收已提交工作单元的事件
    let integration_bus = Arc::new(Bus::new());

    let audit: Arc<dyn Handler> = Arc::new(|e: &Event| {
        let at = e.occurred_at().to_rfc3339_opts(SecondsFormat::Millis, true);
        if let Some(o) = e.body_as::<AccountOpened>() {
            info!(
                event = e.name(),
                %at,
                account = %o.id,
                initial_balance = o.initial_balance,
                "audit"
            );
        } else if let Some(d) = e.body_as::<MoneyDeposited>() {
            info!(
                event = e.name(),
                %at,
                account = %d.id,
                amount = d.amount,
                "audit"
            );
        } else if let Some(w) = e.body_as::<MoneyWithdrawn>() {
            info!(
                event = e.name(),
                %at,
                account = %w.id,
                amount = w.amount,
                "audit"
            );
        } else {
            info!(event = e.name(), %at, "audit");
        }
    });
    let large_withdrawals: Arc<dyn Handler> = Arc::new(handle_only(
        |e: &Event| {
            if let Some(w) = e.body_as::<MoneyWithdrawn>() {
                if w.amount >= 500 {
                    warn!(account = %w.id, amount = w.amount, "large withdrawal");
                }
            }
        },
        [MoneyWithdrawn::NAME],
    ));
    integration_bus.subscribe(audit);
    integration_bus.subscribe(large_withdrawals);

    let relay = integration_bus.clone();
    let service = AccountService {
        repo: AccountRepository::default(),
        integration: Arc::new(move |events: &[Event]| {
            for event in events {
                relay.publish_event(event.clone());
            }
        }),
    };

    let id = "acc-1";
    let commands = [
        AccountCommand::Open {
            initial_balance: 1000,
        },
        AccountCommand::Deposit { amount: 500 },
        AccountCommand::Withdraw { amount: 600 },
        AccountCommand::Withdraw { amount: 5000 },
        AccountCommand::Open { initial_balance: 1 },
    ];

    for command in commands {
        if let Err(err) = service.handle(id, command) {
            warn!(error = %err, "command rejected");
        }
    }

    if let Some(account) = service.repo.load(id) {
        info!(account = %account.id, balance = account.balance, "final state");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (AccountService, Arc<Mutex<Vec<Event>>>) {
        let relayed: Arc<Mutex<Vec<Event>>> = Arc::default();
        let sink = relayed.clone();
        let service = AccountService {
            repo: AccountRepository::default(),
            integration: Arc::new(move |events: &[Event]| sink.lock().extend_from_slice(events)),
        };
        (service, relayed)
    }

    #[test]
    fn committed_commands_relay_their_events() {
        let (service, relayed) = service();
        service
            .handle("acc-1", AccountCommand::Open { initial_balance: 100 })
            .unwrap();
        service
            .handle("acc-1", AccountCommand::Deposit { amount: 25 })
            .unwrap();

        let relayed = relayed.lock();
        let opened = relayed[0].body_as::<AccountOpened>().unwrap();
        assert_eq!((opened.id.as_str(), opened.initial_balance), ("acc-1", 100));
        let deposited = relayed[1].body_as::<MoneyDeposited>().unwrap();
        assert_eq!((deposited.id.as_str(), deposited.amount), ("acc-1", 25));
        assert_eq!(service.repo.load("acc-1").unwrap().balance, 125);
    }

    #[test]
    fn rejected_withdrawal_keeps_state_and_relays_nothing() {
        let (service, relayed) = service();
        service
            .handle("acc-1", AccountCommand::Open { initial_balance: 10 })
            .unwrap();

        let err = service
            .handle("acc-1", AccountCommand::Withdraw { amount: 50 })
            .unwrap_err();
        assert!(err.to_string().starts_with("insufficient funds"));

        assert_eq!(relayed.lock().len(), 1);
        assert_eq!(service.repo.load("acc-1").unwrap().balance, 10);
    }

    #[test]
    fn unknown_account_is_not_found() {
        let (service, relayed) = service();
        assert!(service.repo.load("missing").is_none());
        assert!(
            service
                .handle("missing", AccountCommand::Deposit { amount: 1 })
                .is_err()
        );
        assert!(relayed.lock().is_empty());
    }
}
