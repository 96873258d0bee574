// ============================================================================
// STAKING VIEW - staking.html
// ============================================================================
// Tarjetas de pool (input, Max, Approve, Stake, recompensa estimada) y
// tarjetas de posición (estado, cuenta atrás, Unstake).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use alloy_primitives::U256;
use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement};
use crate::dom::{
    add_class, append_child, clear_children, dispatch_input, event_target_element, get_data, get_element_by_id,
    info_group, input_value, on_click, on_event, on_input, remove_class, require_button,
    require_element, set_button_disabled, set_input_value, set_text_by_id, ElementBuilder,
};
use crate::models::staking::{StakeStatus, StakingPool};
use crate::services::provider::InjectedProvider;
use crate::state::{PageState, SessionContext};
use crate::utils::constants::{POOL_COUNT, TOKEN_DECIMALS, TOKEN_SYMBOL};
use crate::utils::format::format_tokens_grouped;
use crate::viewmodels::countdown::CountdownBoard;
use crate::viewmodels::staking_viewmodel::{
    approve, check_current_amount, load_balance, load_pools, load_positions, max_amount_text, position_rows,
    stake, unstake, PositionRow, APPROVE_SUCCESS, STAKE_SUCCESS, UNSTAKE_SUCCESS,
};
use crate::views::layout::set_button_loading;
use crate::views::modal::{show_error, show_success};

type Ctx = Rc<SessionContext<InjectedProvider>>;

const POOLS_CONTAINER: &str = "pool-cards-container";
const STAKES_CONTAINER: &str = "stakes-list-container";
const NO_STAKES: &str = "no-stakes-message";

thread_local! {
    // Un único tick para todas las cuentas atrás; reemplazarlo cancela el anterior
    static COUNTDOWN: RefCell<Option<Interval>> = RefCell::new(None);
}

/// Pools leídos en esta carga; las posiciones los usan para la etiqueta
#[derive(Clone, Default)]
struct LoadedPools(Rc<RefCell<Vec<StakingPool>>>);

fn tokens(value: U256) -> String {
    format!("{} {}", format_tokens_grouped(value, TOKEN_DECIMALS), TOKEN_SYMBOL)
}

fn now_secs() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

pub fn render_network_mismatch() {
    for id in 0..POOL_COUNT {
        set_button_disabled(&format!("approveBtn-{}", id), true);
        set_button_disabled(&format!("stakeBtn-{}", id), true);
    }
}

pub fn run_staking_page(ctx: Ctx, state: PageState) -> Result<(), JsValue> {
    let pools = LoadedPools::default();
    wire_unstake(ctx.clone(), state.clone(), pools.clone())?;
    load_page_data(ctx, state, pools);
    Ok(())
}

/// Pools y posiciones como dos tareas independientes
fn load_page_data(ctx: Ctx, state: PageState, pools: LoadedPools) {
    state.expect_sections(2);
    {
        let (ctx, state, pools) = (ctx.clone(), state.clone(), pools.clone());
        spawn_local(async move {
            match load_pools(&ctx).await {
                Ok(loaded) => {
                    *pools.0.borrow_mut() = loaded.clone();
                    if let Err(e) = render_pools(&ctx, &state, &pools, &loaded) {
                        log::error!("❌ [STAKING] Error pintando pools: {:?}", e);
                    }
                    if load_balances(&ctx, &state).await {
                        state.section_done();
                    }
                }
                Err(err) => {
                    if let Some(container) = get_element_by_id(POOLS_CONTAINER) {
                        container.set_inner_html("<p class=\"text-danger\">Could not load staking pools.</p>");
                    }
                    if state.section_failed(&err) {
                        show_error(&err);
                    }
                }
            }
        });
    }

    spawn_local(async move {
        match load_positions(&ctx).await {
            Ok(positions) => {
                let rows = position_rows(positions, &pools.0.borrow(), now_secs());
                if let Err(e) = render_positions(&rows) {
                    log::error!("❌ [STAKING] Error pintando posiciones: {:?}", e);
                }
                state.section_done();
            }
            Err(err) => {
                if let Some(msg) = get_element_by_id(NO_STAKES) {
                    msg.set_text_content(Some("Error loading your stakes."));
                    let _ = remove_class(&msg, "d-none");
                }
                if state.section_failed(&err) {
                    show_error(&err);
                }
            }
        }
    });
}

// ----------------------------------------------------------------------------
// Pools
// ----------------------------------------------------------------------------

fn pool_card(pool: &StakingPool) -> Result<Element, JsValue> {
    let i = pool.id;

    let header = ElementBuilder::new("div")?
        .class("pool-header")
        .child(ElementBuilder::new("h4")?.class("pool-title").text(&pool.title()).build())?
        .child(ElementBuilder::new("span")?.class("pool-apr").text(&format!("APR: {}%", pool.apr)).build())?
        .build();

    let label_row = ElementBuilder::new("div")?
        .class("d-flex justify-content-between mb-1")
        .child(ElementBuilder::new("label")?.class("form-label").text("Amount to Stake").build())?
        .child(
            ElementBuilder::new("span")?
                .class("wallet-balance-label")
                .id(&format!("balanceLabel-{}", i))?
                .text(&format!("Balance: ... {}", TOKEN_SYMBOL))
                .build(),
        )?
        .build();

    let input_group = ElementBuilder::new("div")?
        .class("input-group")
        .child(
            ElementBuilder::new("input")?
                .class("form-control")
                .id(&format!("stakeAmount-{}", i))?
                .attr("type", "number")?
                .attr("placeholder", "0.00")?
                .build(),
        )?
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-outline-secondary")
                .id(&format!("maxBtn-{}", i))?
                .attr("type", "button")?
                .text("Max")
                .build(),
        )?
        .build();

    let body = ElementBuilder::new("div")?
        .class("pool-body")
        .child(ElementBuilder::new("div")?.class("mb-3").children(vec![label_row, input_group])?.build())?
        .child(
            ElementBuilder::new("div")?
                .class("estimated-reward")
                .id(&format!("reward-{}", i))?
                .text(&format!("Estimated Reward: 0.00 {}", TOKEN_SYMBOL))
                .build(),
        )?
        .build();

    let footer = ElementBuilder::new("div")?
        .class("pool-footer")
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-secondary w-100 mb-2")
                .id(&format!("approveBtn-{}", i))?
                .attr("data-original-text", "Approve CLK")?
                .flag("disabled", true)?
                .text("Approve CLK")
                .build(),
        )?
        .child(
            ElementBuilder::new("button")?
                .class("btn btn-primary w-100")
                .id(&format!("stakeBtn-{}", i))?
                .attr("data-original-text", "Stake")?
                .flag("disabled", true)?
                .text("Stake")
                .build(),
        )?
        .build();

    let card = ElementBuilder::new("div")?
        .class("stake-pool-card")
        .children(vec![header, body, footer])?
        .build();

    Ok(ElementBuilder::new("div")?.class("col-lg-4").child(card)?.build())
}

fn render_pools(ctx: &Ctx, state: &PageState, loaded: &LoadedPools, pools: &[StakingPool]) -> Result<(), JsValue> {
    let container = require_element(POOLS_CONTAINER)?;
    clear_children(&container);
    for pool in pools {
        append_child(&container, &pool_card(pool)?)?;
        wire_pool(ctx.clone(), state.clone(), loaded.clone(), pool.id)?;
    }
    Ok(())
}

/// Balance en cada tarjeta + botón Max; `false` si la lectura falló
async fn load_balances(ctx: &Ctx, state: &PageState) -> bool {
    let balance = match load_balance(ctx).await {
        Ok(b) => b,
        Err(err) => {
            for id in 0..POOL_COUNT {
                set_text_by_id(&format!("balanceLabel-{}", id), "Balance: Error");
            }
            if state.section_failed(&err) {
                show_error(&err);
            }
            return false;
        }
    };

    for id in 0..POOL_COUNT {
        set_text_by_id(&format!("balanceLabel-{}", id), &format!("Balance: {}", tokens(balance)));
        if let Some(max_btn) = get_element_by_id(&format!("maxBtn-{}", id)) {
            let result = on_click(&max_btn, move |_| {
                let input_id = format!("stakeAmount-{}", id);
                set_input_value(&input_id, &max_amount_text(balance));
                if let Some(input) = get_element_by_id(&input_id) {
                    let _ = dispatch_input(&input);
                }
            });
            if let Err(e) = result {
                log::error!("❌ [STAKING] Error registrando Max: {:?}", e);
            }
        }
    }
    true
}

fn wire_pool(ctx: Ctx, state: PageState, loaded: LoadedPools, pool_id: u64) -> Result<(), JsValue> {
    let input_id = format!("stakeAmount-{}", pool_id);
    let approve_id = format!("approveBtn-{}", pool_id);
    let stake_id = format!("stakeBtn-{}", pool_id);

    // Input: allowance -> botones; calculateReward -> estimación
    {
        let ctx = ctx.clone();
        let (input_id, approve_id, stake_id) = (input_id.clone(), approve_id.clone(), stake_id.clone());
        let input = require_element(&input_id)?;
        on_input(&input, move |_| {
            let ctx = ctx.clone();
            let (input_id, approve_id, stake_id) = (input_id.clone(), approve_id.clone(), stake_id.clone());
            spawn_local(async move {
                let text = input_value(&input_id);
                match check_current_amount(&ctx, &text, pool_id, || input_value(&input_id)).await {
                    Ok(None) => {}
                    Ok(Some(check)) => {
                        set_button_disabled(&approve_id, !check.gate.approve_enabled);
                        set_button_disabled(&stake_id, !check.gate.stake_enabled);
                        set_text_by_id(
                            &format!("reward-{}", pool_id),
                            &format!("Estimated Reward: {}", tokens(check.reward)),
                        );
                    }
                    Err(err) => show_error(&err),
                }
            });
        })?;
    }

    // Approve
    {
        let ctx = ctx.clone();
        let (input_id, stake_id) = (input_id.clone(), stake_id.clone());
        let button = require_button(&approve_id)?;
        let handler_button = button.clone();
        on_click(&button, move |_| {
            let (ctx, button) = (ctx.clone(), handler_button.clone());
            let (input_id, stake_id) = (input_id.clone(), stake_id.clone());
            set_button_loading(&button, true, "Approving...");
            spawn_local(async move {
                let result = approve(&ctx, &input_value(&input_id)).await;
                set_button_loading(&button, false, "Approve CLK");
                match result {
                    Ok(_) => {
                        show_success(APPROVE_SUCCESS);
                        button.set_disabled(true);
                        set_button_disabled(&stake_id, false);
                    }
                    Err(err) => show_error(&err),
                }
            });
        })?;
    }

    // Stake
    let button = require_button(&stake_id)?;
    let handler_button = button.clone();
    on_click(&button, move |_| {
        let (ctx, state, loaded, button) = (ctx.clone(), state.clone(), loaded.clone(), handler_button.clone());
        let input_id = input_id.clone();
        set_button_loading(&button, true, "Staking...");
        spawn_local(async move {
            let result = stake(&ctx, &input_value(&input_id), pool_id).await;
            set_button_loading(&button, false, "Stake");
            button.set_disabled(true);
            match result {
                Ok(_) => {
                    show_success(STAKE_SUCCESS);
                    set_input_value(&input_id, "");
                    load_page_data(ctx, state, loaded);
                }
                Err(err) => show_error(&err),
            }
        });
    })
}

// ----------------------------------------------------------------------------
// Posiciones
// ----------------------------------------------------------------------------

fn position_card(row: &PositionRow) -> Result<Element, JsValue> {
    let index = row.position.index;
    let action = match row.status {
        StakeStatus::Claimed => ElementBuilder::new("button")?
            .class("btn btn-outline-secondary")
            .flag("disabled", true)?
            .text("Unstaked"),
        StakeStatus::Unlocked => ElementBuilder::new("button")?
            .class("btn btn-success unstake-btn")
            .attr("data-index", &index.to_string())?
            .attr("data-original-text", "Unstake")?
            .text("Unstake"),
        StakeStatus::Locked => ElementBuilder::new("button")?
            .class("btn btn-secondary")
            .flag("disabled", true)?
            .text("Locked"),
    };

    Ok(ElementBuilder::new("div")?
        .class("stake-position-card")
        .children(vec![
            info_group("Amount Staked", &tokens(row.position.amount), "", None)?,
            info_group("Pool", &row.pool_label, "", None)?,
            info_group("Unlocks In", &row.unlocks_in, "", Some(&format!("countdown-{}", index)))?,
            info_group("Est. Reward", &tokens(row.estimated_reward), "", None)?,
            info_group("Status", row.status.label(), row.status.css_class(), None)?,
            ElementBuilder::new("div")?.class("action-group").child(action.build())?.build(),
        ])?
        .build())
}

fn render_positions(rows: &[PositionRow]) -> Result<(), JsValue> {
    let container = require_element(STAKES_CONTAINER)?;
    clear_children(&container);

    let no_stakes = get_element_by_id(NO_STAKES);
    if rows.is_empty() {
        if let Some(msg) = &no_stakes {
            remove_class(msg, "d-none")?;
        }
        start_countdown(CountdownBoard::new());
        return Ok(());
    }
    if let Some(msg) = &no_stakes {
        add_class(msg, "d-none")?;
    }

    let mut board = CountdownBoard::new();
    for row in rows {
        append_child(&container, &position_card(row)?)?;
        if row.needs_countdown() {
            board.track(format!("countdown-{}", row.position.index), row.position.unlock_secs());
        }
    }
    start_countdown(board);
    Ok(())
}

/// Reemplaza el tick activo; soltar el `Interval` anterior lo cancela
fn start_countdown(board: CountdownBoard) {
    let interval = if board.is_empty() {
        None
    } else {
        let board = Rc::new(RefCell::new(board));
        Some(Interval::new(1_000, move || {
            for (id, text) in board.borrow_mut().tick(now_secs()) {
                set_text_by_id(&id, &text);
            }
        }))
    };
    COUNTDOWN.with(|slot| *slot.borrow_mut() = interval);
}

/// Click delegado en el contenedor: las tarjetas se recrean en cada recarga
fn wire_unstake(ctx: Ctx, state: PageState, loaded: LoadedPools) -> Result<(), JsValue> {
    let container = require_element(STAKES_CONTAINER)?;
    on_event(&container, "click", move |event| {
        let Some(target) = event_target_element(&event) else { return };
        if !target.class_list().contains("unstake-btn") {
            return;
        }
        let Some(index) = get_data(&target, "index").and_then(|i| i.parse::<usize>().ok()) else {
            return;
        };
        let Ok(button) = target.dyn_into::<HtmlButtonElement>() else { return };
        if button.disabled() {
            return;
        }

        let (ctx, state, loaded) = (ctx.clone(), state.clone(), loaded.clone());
        set_button_loading(&button, true, "Unstaking...");
        spawn_local(async move {
            match unstake(&ctx, index).await {
                Ok(_) => {
                    show_success(UNSTAKE_SUCCESS);
                    load_page_data(ctx, state, loaded);
                }
                Err(err) => {
                    show_error(&err);
                    set_button_loading(&button, false, "Unstake");
                }
            }
        });
    })
}

