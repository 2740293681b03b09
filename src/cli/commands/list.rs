use crate::cli::commands::open_service;
use crate::client::mask::format_phone;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_discount};
use crate::utils::formatting::{money, truncate};
use crate::utils::table::Table;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let service = open_service(cfg)?;
    let debtors = service.list()?;

    if debtors.is_empty() {
        info("No debtors registered.");
        return Ok(());
    }

    let mut table = Table::new(&["PHONE", "NAME", "VALUE", "DUE", "DISCOUNT", "TOTAL"]);
    for d in &debtors {
        table.add_row(vec![
            format_phone(&d.phone),
            truncate(&d.name, 28),
            money(d.value),
            d.due_date.clone(),
            format!("{}{}{}", color_for_discount(d.discount), money(d.discount), RESET),
            money(d.total()),
        ]);
    }

    print!("{}", table.render());
    info(format!("{} debtor(s)", debtors.len()));
    Ok(())
}
