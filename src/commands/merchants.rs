use super::{parse_fields, render_pending, ActiveView, Dashboard};
use crate::models::MerchantCreatePayload;
use crate::query::{MerchantSortField, MerchantTab, SearchType, SortField};
use crate::services::{MerchantDetailView, MerchantListView, MutationError};
use crate::utils::table::Table;
use crate::utils::validation::BUSINESS_TYPES;

pub async fn list(dashboard: &mut Dashboard) -> Result<String, String> {
    dashboard.active = ActiveView::Merchants;
    dashboard.merchants.load().await;
    Ok(render_list(&dashboard.merchants))
}

pub async fn search(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let usage = "Usage: `search id <merchant id>` or `search name <text>` (no text clears the search)";
    let search_type = match args.first().map(|a| a.to_lowercase()).as_deref() {
        Some("id") => SearchType::MerchantId,
        Some("name") => SearchType::MerchantName,
        _ => return Err(usage.to_string()),
    };
    let text = args[1..].join(" ");

    dashboard.active = ActiveView::Merchants;
    dashboard.merchants.search(search_type, &text).await;
    Ok(render_list(&dashboard.merchants))
}

pub async fn tab(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let tab = match args.first().map(|a| a.to_lowercase()).as_deref() {
        Some("active") => MerchantTab::Active,
        Some("inactive") => MerchantTab::Inactive,
        _ => return Err("Usage: `tab active` or `tab inactive`".to_string()),
    };

    dashboard.active = ActiveView::Merchants;
    dashboard.merchants.switch_tab(tab).await;
    Ok(render_list(&dashboard.merchants))
}

pub async fn sort(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let field: MerchantSortField = args
        .first()
        .ok_or_else(|| {
            let fields: Vec<&str> = MerchantSortField::ALL.iter().map(|f| f.as_str()).collect();
            format!("Usage: `sort <field>` where field is one of: {}", fields.join(", "))
        })?
        .parse()
        .map_err(|e: crate::query::QueryError| e.to_string())?;

    dashboard.active = ActiveView::Merchants;
    dashboard.merchants.toggle_sort(field).await;
    Ok(render_list(&dashboard.merchants))
}

pub async fn reset(dashboard: &mut Dashboard) -> Result<String, String> {
    dashboard.active = ActiveView::Merchants;
    dashboard.merchants.reset().await;
    Ok(render_list(&dashboard.merchants))
}

pub async fn create(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    if args.is_empty() {
        return Err(format!(
            "Usage: `create merchantName=.. businessName=.. email=.. phone=.. businessType=.. taxId=.. registrationNumber=..`\n\
             Business types: {}",
            BUSINESS_TYPES.join(", ")
        ));
    }

    let mut payload = MerchantCreatePayload::default();
    for (key, value) in parse_fields(args)? {
        let slot = match key.as_str() {
            "merchantName" => &mut payload.merchant_name,
            "businessName" => &mut payload.business_name,
            "email" => &mut payload.email,
            "phone" => &mut payload.phone,
            "businessType" => &mut payload.business_type,
            "taxId" => &mut payload.tax_id,
            "registrationNumber" => &mut payload.registration_number,
            other => return Err(format!("Unknown merchant field '{}'", other)),
        };
        *slot = value.trim().to_string();
    }

    dashboard.active = ActiveView::Merchants;
    dashboard
        .merchants
        .create_merchant(&payload)
        .await
        .map_err(mutation_message)?;
    Ok(render_list(&dashboard.merchants))
}

pub async fn detail(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let merchant_id = args.first().ok_or("Usage: `merchant <merchant id>`".to_string())?;
    dashboard.active = ActiveView::MerchantDetail;
    dashboard.detail.open(merchant_id).await;
    Ok(render_detail(&dashboard.detail))
}

pub async fn edit(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let usage = "Usage: `edit <merchant id> email=<email> phone=<phone>`";
    let (merchant_id, rest) = args.split_first().ok_or(usage.to_string())?;

    let mut email = None;
    let mut phone = None;
    for (key, value) in parse_fields(rest)? {
        match key.as_str() {
            "email" => email = Some(value),
            "phone" => phone = Some(value),
            other => return Err(format!("Only email and phone can be edited, not '{}'", other)),
        }
    }
    let (email, phone) = match (email, phone) {
        (Some(email), Some(phone)) => (email, phone),
        _ => return Err(usage.to_string()),
    };

    dashboard.active = ActiveView::MerchantDetail;
    dashboard.detail.open(merchant_id).await;
    dashboard
        .detail
        .update_contact(&email, &phone)
        .await
        .map_err(mutation_message)?;
    Ok(render_detail(&dashboard.detail))
}

pub async fn toggle(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let merchant_id = args.first().ok_or("Usage: `toggle <merchant id>`".to_string())?;
    dashboard.active = ActiveView::MerchantDetail;
    dashboard.detail.open(merchant_id).await;
    dashboard.detail.toggle_status().await.map_err(mutation_message)?;
    Ok(render_detail(&dashboard.detail))
}

/// API failures were already notified; only describe what the notifier did not
fn mutation_message(err: MutationError) -> String {
    match err {
        MutationError::Validation(errors) => {
            let lines: Vec<String> = errors
                .errors
                .iter()
                .map(|e| format!("  • {}: {}", e.field, e.message))
                .collect();
            format!("Please fix the following:\n{}", lines.join("\n"))
        }
        MutationError::Api(_) | MutationError::Rejected(_) => "Merchant was not saved".to_string(),
        MutationError::NotLoaded => MutationError::NotLoaded.to_string(),
    }
}

fn header(view: &MerchantListView, field: MerchantSortField, label: &str) -> String {
    match view.query().sort().direction_of(field) {
        Some(direction) => format!("{} {}", label, direction.arrow()),
        None => label.to_string(),
    }
}

pub fn render_list(view: &MerchantListView) -> String {
    let state = view.state();
    let tab = match view.query().tab() {
        MerchantTab::Active => "Active",
        MerchantTab::Inactive => "Inactive",
    };
    let mut out = format!("🏪 {} merchants\n", tab);
    if let Some(id) = view.query().merchant_id() {
        out.push_str(&format!("Search: merchant ID = {}\n", id));
    }
    if let Some(name) = view.query().merchant_name() {
        out.push_str(&format!("Search: merchant name contains \"{}\"\n", name));
    }

    if let Some(pending) = render_pending(&state, "merchants") {
        out.push_str(&pending);
        return out;
    }
    let Some(page) = state.data() else {
        return out;
    };

    if page.merchants.is_empty() {
        out.push_str("No merchants found");
        return out;
    }

    let mut table = Table::new(&[
        header(view, MerchantSortField::MerchantId, "Merchant ID"),
        header(view, MerchantSortField::MerchantName, "Merchant Name"),
        "Business Name".to_string(),
        "Email".to_string(),
        "Phone".to_string(),
        header(view, MerchantSortField::BusinessType, "Type"),
        header(view, MerchantSortField::CreatedAt, "Created"),
    ]);
    for merchant in &page.merchants {
        table.add_row(&[
            merchant.merchant_id.clone(),
            merchant.merchant_name.clone(),
            merchant.business_name.clone(),
            merchant.email.clone(),
            merchant.phone.clone(),
            merchant.business_type.clone(),
            merchant
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&table.render());
    out.push_str(&view.page().summary());
    let controls = view.page().render_controls();
    if !controls.is_empty() {
        out.push('\n');
        out.push_str(&controls);
    }
    out
}

pub fn render_detail(view: &MerchantDetailView) -> String {
    let state = view.state();
    if let Some(pending) = render_pending(&state, "merchant") {
        return pending;
    }
    let Some(m) = state.data() else {
        return String::new();
    };

    let mut lines = vec![
        format!("🏪 {} ({})", m.merchant_name, m.merchant_id),
        format!("Status:              {}", if m.is_active { "Active" } else { "Inactive" }),
        format!("Business name:       {}", m.business_name),
        format!("Business type:       {}", m.business_type),
        format!("Email:               {}", m.email),
        format!("Phone:               {}", m.phone),
        format!("Tax ID:              {}", m.tax_id.as_deref().unwrap_or("-")),
        format!(
            "Registration number: {}",
            m.registration_number.as_deref().unwrap_or("-")
        ),
    ];
    if let Some(created) = m.created_at {
        lines.push(format!("Created:             {}", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(updated) = m.updated_at {
        lines.push(format!("Updated:             {}", updated.format("%Y-%m-%d %H:%M")));
    }
    lines.join("\n")
}
