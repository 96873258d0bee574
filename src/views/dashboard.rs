// ============================================================================
// DASHBOARD VIEW - dashboard.html
// ============================================================================

use std::rc::Rc;
use crate::errors::DappResult;
use crate::services::provider::InjectedProvider;
use crate::state::{PageState, SessionContext};
use crate::utils::constants::TOKEN_DECIMALS;
use crate::utils::format::format_tokens_truncated;
use crate::viewmodels::load_dashboard;
use crate::views::layout::fill_cells;
use crate::views::modal::show_error;
use crate::dom::set_text_by_id;

const WALLET_BALANCE: &str = "walletBalance";
const TOTAL_STAKED: &str = "totalStaked";
const ACTIVE_STAKES: &str = "activeStakes";
const PLATFORM_TVL: &str = "platformTvl";

pub fn render_network_mismatch() {
    fill_cells(&[WALLET_BALANCE, TOTAL_STAKED, ACTIVE_STAKES, PLATFORM_TVL], "Wrong Network");
}

/// Pinta una sección o su error inline; el primer error de la página abre el modal
fn render_section<T>(state: &PageState, ids: &[&str], result: &DappResult<T>, render: impl Fn(&T)) {
    match result {
        Ok(value) => render(value),
        Err(err) => {
            fill_cells(ids, "Error");
            if state.section_failed(err) {
                show_error(err);
            }
        }
    }
}

pub async fn run_dashboard_page(ctx: Rc<SessionContext<InjectedProvider>>, state: PageState) {
    let data = load_dashboard(&ctx).await;

    render_section(&state, &[WALLET_BALANCE], &data.balance, |balance| {
        set_text_by_id(WALLET_BALANCE, &format_tokens_truncated(*balance, TOKEN_DECIMALS));
    });
    render_section(&state, &[TOTAL_STAKED, ACTIVE_STAKES], &data.positions, |summary| {
        set_text_by_id(TOTAL_STAKED, &format_tokens_truncated(summary.total_staked, TOKEN_DECIMALS));
        set_text_by_id(ACTIVE_STAKES, &summary.active_stakes.to_string());
    });
    render_section(&state, &[PLATFORM_TVL], &data.tvl, |tvl| {
        set_text_by_id(PLATFORM_TVL, &format_tokens_truncated(*tvl, TOKEN_DECIMALS));
    });

    state.mark_loaded();
}
