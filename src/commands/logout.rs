use crate::{
    libs::{context::AppContext, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;

pub fn cmd(ctx: &mut AppContext) -> Result<()> {
    if ctx.current_user()?.is_none() {
        msg_info!(Message::NotSignedIn);
        return Ok(());
    }
    ctx.auth().sign_out()?;
    msg_success!(Message::SignedOut);
    Ok(())
}
