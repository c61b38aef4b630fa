//! Turnstile
//!
//! This example drives a coin-operated turnstile through its states.
//!
//! Key concepts:
//! - Plain and payload-carrying triggers on the same state
//! - Async actions that may fail, and how the failure surfaces
//! - Entry and exit hooks around a transition
//! - Bounded transition history
//!
//! Run with: cargo run --example turnstile
//! Set RUST_LOG=trigger_fsm=debug to see the dispatch spans.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use trigger_fsm::{state_enum, trigger_enum, StateMachineBuilder, TriggerResult};

state_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
        Broken,
    }
    final: [Broken]
}

trigger_enum! {
    enum Input {
        Coin,
        Push,
        Kick,
    }
}

/// Coin value in cents.
const FARE: u32 = 50;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile Example ===\n");

    let collected = Arc::new(AtomicU32::new(0));
    let till = Arc::clone(&collected);

    let mut turnstile = StateMachineBuilder::new()
        .initial(Turnstile::Locked)
        .on_transition(|r: &TriggerResult<Turnstile, Input>| {
            println!("  [{:?}] {:?} -> {:?}", r.trigger, r.old_state, r.new_state);
        })
        .with_history(16)
        .build()?;

    turnstile
        .configure(Turnstile::Locked)
        .on_action(Input::Push, || println!("  Locked: push does nothing"))?
        .change_state_async_with(Input::Coin, Turnstile::Unlocked, move |cents: u32| {
            let till = Arc::clone(&till);
            async move {
                anyhow::ensure!(cents >= FARE, "{cents} cents is below the fare");
                till.fetch_add(cents, Ordering::SeqCst);
                Ok(())
            }
        })?
        .change_state(Input::Kick, Turnstile::Broken)?
        .on_exit(|| println!("  Releasing lock"));

    turnstile
        .configure(Turnstile::Unlocked)
        .on_entry(|| println!("  Green light on"))
        .on_action_with(Input::Coin, |cents: u32| {
            println!("  Already unlocked, returning {cents} cents")
        })?
        .change_state(Input::Push, Turnstile::Locked)?;

    println!("Pushing a locked turnstile:");
    turnstile.fire(Input::Push).await?;

    println!("\nInserting too little:");
    if let Err(err) = turnstile.fire_with(Input::Coin, 20u32).await {
        println!("  Rejected: {err}");
    }
    println!("  Still {:?}", turnstile.current_state());

    println!("\nPaying the fare and walking through:");
    turnstile.fire_with(Input::Coin, FARE).await?;
    turnstile.fire_with(Input::Coin, 25u32).await?;
    turnstile.fire(Input::Push).await?;

    println!("\nA bare coin trigger has no matching callback:");
    if let Err(err) = turnstile.fire(Input::Coin).await {
        println!("  Rejected: {err}");
    }

    println!("\nKicking it:");
    turnstile.fire(Input::Kick).await?;
    if let Err(err) = turnstile.fire(Input::Push).await {
        println!("  Rejected: {err}");
    }

    println!("\nCollected: {} cents", collected.load(Ordering::SeqCst));
    println!("Final: {}", turnstile.is_final());
    if let Some(history) = turnstile.history() {
        println!("Path: {:?}", history.get_path());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
