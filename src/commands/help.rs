pub fn text() -> String {
    [
        "📖 Merchant Dashboard Commands",
        "",
        "🏪 Merchants",
        "  merchants                      Show the merchant list",
        "  search id|name <text>          Search by merchant ID or name (no text clears)",
        "  tab active|inactive            Switch between active and inactive merchants",
        "  sort <field>                   Cycle sorting on merchantId, merchantName, businessType or createdAt",
        "  reset                          Clear search, sorting and tab",
        "  create key=value ...           Add a merchant (merchantName, businessName, email, phone,",
        "                                 businessType, taxId, registrationNumber)",
        "  merchant <id>                  Show merchant details",
        "  edit <id> email=.. phone=..    Update contact details",
        "  toggle <id>                    Activate or deactivate a merchant",
        "",
        "💳 Transactions",
        "  tx [<merchant id>]             Show transactions, optionally for another merchant",
        "  filter [status=..] [from=YYYY-MM-DD] [to=YYYY-MM-DD]",
        "                                 Filter by status and date range",
        "  clear                          Remove all transaction filters",
        "  export                         Save the merchant's transactions as CSV",
        "",
        "📊 Reports",
        "  reports                        Show transaction analytics",
        "",
        "🧭 Navigation (applies to the list shown last)",
        "  page <n> | next | prev         Move between pages",
        "  size 10|20|50|100              Change rows per page",
        "  refresh                        Reload the current view",
        "  help | quit",
    ]
    .join("\n")
}
