/// 应用服务示例
/// 展示在一次工作单元中发布领域事件，仅在仓储保存成功后才对外发布
use anyhow::{Result, bail};
use eventd::prelude::*;
use eventd_lifecycle::{Lifecycle, LifecycleConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, EventBody)]
struct AccountOpened {
    id: String,
    initial_balance: i64,
}

#[derive(Debug, EventBody)]
struct MoneyWithdrawn {
    id: String,
    amount: i64,
}

#[derive(Default)]
struct AccountRepository {
    balances: Mutex<HashMap<String, i64>>,
}

impl AccountRepository {
    fn save(&self, id: &str, balance: i64) -> Result<()> {
        if balance < 0 {
            bail!("balance of {id} would become negative");
        }
        self.balances.lock().unwrap().insert(id.to_string(), balance);
        Ok(())
    }

    fn balance(&self, id: &str) -> i64 {
        self.balances.lock().unwrap().get(id).copied().unwrap_or(0)
    }
}

fn open_account(ctx: &Context, repo: &AccountRepository, id: &str, initial: i64) -> Result<()> {
    eventd::require_publisher(ctx)?.publish_body(AccountOpened {
        id: id.to_string(),
        initial_balance: initial,
    });
    repo.save(id, initial)
}

fn withdraw(ctx: &Context, repo: &AccountRepository, id: &str, amount: i64) -> Result<()> {
    eventd::require_publisher(ctx)?.publish_body(MoneyWithdrawn {
        id: id.to_string(),
        amount,
    });
    repo.save(id, repo.balance(id) - amount)
}

fn main() -> Result<()> {
    let repo = AccountRepository::default();
    let outbox: Arc<Mutex<Vec<String>>> = Arc::default();

    let sink = outbox.clone();
    let handler: Arc<dyn eventd_lifecycle::EventHandler> = Arc::new(move |events: &[Event]| {
        let mut outbox = sink.lock().unwrap();
        outbox.extend(events.iter().map(|e| e.name().to_string()));
    });

    let cfg = LifecycleConfig::builder().label("open-account").build();
    Lifecycle::with_config(Some(handler.clone()), cfg)
        .run(|ctx| open_account(ctx, &repo, "acc-1", 100))?;
    println!("after open: {:?}", outbox.lock().unwrap());

    let cfg = LifecycleConfig::builder().label("withdraw").build();
    let failed = Lifecycle::with_config(Some(handler), cfg)
        .run(|ctx| withdraw(ctx, &repo, "acc-1", 500));
    println!("withdraw failed: {}", failed.is_err());
    println!("after failed withdraw: {:?}", outbox.lock().unwrap());

    Ok(())
}
