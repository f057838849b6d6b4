// File: src/views.rs
// Purpose: Maud components for the dashboard, inventory table, product modal, and ledger form
//
// Every interpolated value goes through Maud, which escapes it.

use crate::catalog::DashboardStats;
use crate::form::FormContext;
use crate::model::{MovementKind, Product, StockStatus, Transaction};
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Element ids shared between the views and the handlers that swap them
pub mod ids {
    pub const MODAL: &str = "modal";
    pub const INVENTORY_ROWS: &str = "inventory-rows";
    pub const STATS: &str = "stats";
    pub const LEDGER: &str = "ledger";
    pub const MOVEMENT_FORM: &str = "movement-form";
    pub const SEARCH_INPUT: &str = "search-input";
    pub const CATEGORY_FILTER: &str = "category-filter";
    pub const CATEGORY_SLOT: &str = "category-slot";
}

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.3";

const STYLES: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; display: flex; min-height: 100vh; font-family: system-ui, sans-serif; background: #f4f5f7; color: #222; }
.sidebar { width: 220px; background: #1f2937; color: #fff; padding: 1.5rem 1rem; }
.sidebar nav a { display: block; padding: .5rem .75rem; color: #cbd5e1; text-decoration: none; border-radius: 6px; }
.sidebar nav a.active, .sidebar nav a:hover { background: #374151; color: #fff; }
.content { flex: 1; padding: 2rem; }
.stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-bottom: 1.5rem; }
.card, .panel { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.card-label { display: block; color: #6b7280; font-size: .85rem; }
.card-value { display: block; font-size: 1.75rem; font-weight: 600; }
.toolbar { display: flex; gap: .5rem; margin-bottom: 1rem; }
.table { width: 100%; border-collapse: collapse; background: #fff; }
.table th, .table td { padding: .6rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
.table td.empty { text-align: center; color: #6b7280; }
.thumb { width: 40px; height: 40px; object-fit: cover; border-radius: 4px; }
.btn { padding: .45rem .9rem; border: 1px solid #d1d5db; border-radius: 6px; background: #fff; cursor: pointer; }
.btn-sm { padding: .25rem .6rem; font-size: .85rem; }
.btn-primary { background: #2563eb; border-color: #2563eb; color: #fff; }
.btn-danger { background: #dc2626; border-color: #dc2626; color: #fff; }
.badge { padding: .15rem .5rem; border-radius: 999px; font-size: .8rem; }
.badge-in-stock { background: #dcfce7; color: #166534; }
.badge-low-stock { background: #fef9c3; color: #854d0e; }
.badge-out-of-stock { background: #fee2e2; color: #991b1b; }
.modal { display: none; }
.modal.active { display: flex; position: fixed; inset: 0; align-items: center; justify-content: center; background: rgba(0,0,0,.4); }
.modal-content { background: #fff; border-radius: 8px; padding: 1.5rem; width: 420px; max-width: 95vw; }
.modal-header { display: flex; justify-content: space-between; align-items: center; }
.modal-header .close { border: none; background: none; font-size: 1.5rem; cursor: pointer; }
.modal-actions { display: flex; justify-content: flex-end; gap: .5rem; margin-top: 1rem; }
.form-group { margin-bottom: .75rem; }
.form-group label { display: block; font-size: .85rem; margin-bottom: .25rem; }
.form-group input, .movement-form select, .movement-form input { width: 100%; padding: .4rem; }
.has-error input { border-color: #dc2626; }
.field-error { color: #dc2626; font-size: .8rem; }
.toast { position: fixed; right: 1.5rem; bottom: 1.5rem; padding: .75rem 1rem; border-radius: 6px; background: #111827; color: #fff; opacity: 0; pointer-events: none; transition: opacity .2s; }
.toast.active { opacity: 1; }
"#;

// Lets 422 responses swap in (re-rendered forms), wires toast and modal events.
const CLIENT_SCRIPT: &str = r#"
htmx.config.responseHandling = [
  {code: "204", swap: false},
  {code: "[23]..", swap: true},
  {code: "422", swap: true},
  {code: "[45]..", swap: false, error: true}
];
document.body.addEventListener("closeModal", function () {
  document.getElementById("modal").innerHTML = "";
});
document.body.addEventListener("showToast", function (e) {
  var toast = document.getElementById("toast");
  toast.textContent = e.detail.message;
  toast.classList.add("active");
  setTimeout(function () { toast.classList.remove("active"); }, 2500);
});
"#;

/// Which sidebar entry is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Dashboard,
    Inventory,
}

// ============================================================================
// LAYOUT
// ============================================================================

pub fn layout(title: &str, active: Nav, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Stockroom" }
                style { (PreEscaped(STYLES)) }
                script src=(HTMX_SRC) {}
            }
            body {
                aside class="sidebar" {
                    h2 { "Stockroom" }
                    nav {
                        a href="/" class=[(active == Nav::Dashboard).then_some("active")] { "Dashboard" }
                        a href="/inventory" class=[(active == Nav::Inventory).then_some("active")] { "Inventory" }
                    }
                }
                main class="content" {
                    h1 { (title) }
                    (content)
                }
                div id=(ids::MODAL) {}
                div id="toast" class="toast" {}
                script { (PreEscaped(CLIENT_SCRIPT)) }
            }
        }
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

pub fn stats_cards(stats: &DashboardStats) -> Markup {
    html! {
        div class="stats" {
            div class="card" {
                span class="card-label" { "Total Stock" }
                span class="card-value" id="totalStock" { (stats.total_stock) }
            }
            div class="card" {
                span class="card-label" { "Low Stock Items" }
                span class="card-value" id="lowStock" { (stats.low_stock) }
            }
            div class="card" {
                span class="card-label" { "Today's Transactions" }
                span class="card-value" id="todayTransactions" { (stats.today_transactions) }
            }
        }
    }
}

fn movement_badge(kind: MovementKind) -> Markup {
    let class = match kind {
        MovementKind::In => "badge badge-in-stock",
        MovementKind::Out => "badge badge-out-of-stock",
    };
    html! { span class=(class) { (kind.label()) } }
}

pub fn transaction_table(transactions: &[Transaction]) -> Markup {
    html! {
        table class="table" {
            thead {
                tr { th { "Date" } th { "SKU" } th { "Product" } th { "Type" } th { "Qty" } }
            }
            tbody {
                @if transactions.is_empty() {
                    tr { td colspan="5" class="empty" { "No transactions yet" } }
                }
                @for t in transactions {
                    tr {
                        td { (t.date) }
                        td { (t.sku) }
                        td { (t.name) }
                        td { (movement_badge(t.kind)) }
                        td { (t.qty) }
                    }
                }
            }
        }
    }
}

fn field_error(ctx: &FormContext, field: &str) -> Markup {
    html! {
        @if let Some(message) = ctx.get_error(field) {
            span class="field-error" { (message) }
        }
    }
}

/// Ledger entry form; `products` fills the SKU picker
pub fn movement_form(products: &[Product], ctx: &FormContext) -> Markup {
    let selected_kind = ctx.value("type");
    html! {
        form id=(ids::MOVEMENT_FORM) class="movement-form"
            hx-post="/transactions" hx-target={ "#" (ids::LEDGER) } hx-swap="innerHTML" {
            label {
                "Product"
                select name="sku" {
                    @for p in products {
                        option value=(p.sku) selected[ctx.value("sku") == p.sku] { (p.sku) " - " (p.name) }
                    }
                }
                (field_error(ctx, "sku"))
            }
            label {
                "Type"
                select name="type" {
                    option value="IN" selected[selected_kind == "IN"] { (MovementKind::In.label()) }
                    option value="OUT" selected[selected_kind == "OUT"] { (MovementKind::Out.label()) }
                }
                (field_error(ctx, "type"))
            }
            label {
                "Quantity"
                input type="number" name="qty" min="1" value=(ctx.value("qty"));
                (field_error(ctx, "qty"))
            }
            button type="submit" class="btn btn-primary" { "Record" }
        }
    }
}

pub fn dashboard_page(
    stats: &DashboardStats,
    recent: &[Transaction],
    products: &[Product],
) -> Markup {
    let content = html! {
        section id=(ids::STATS) { (stats_cards(stats)) }
        section class="panel" {
            h2 { "Recent Transactions" }
            div id=(ids::LEDGER) { (transaction_table(recent)) }
        }
        section class="panel" {
            h2 { "Record Movement" }
            (movement_form(products, &FormContext::empty()))
        }
    };
    layout("Dashboard", Nav::Dashboard, content)
}

// ============================================================================
// INVENTORY
// ============================================================================

pub fn status_badge(status: StockStatus) -> Markup {
    html! {
        span class={ "badge " (status.badge_class()) } { (status.label()) }
    }
}

pub fn product_row(product: &Product) -> Markup {
    html! {
        tr id={ "product-" (product.id) } {
            td { img src=(product.image) alt="img" class="thumb"; }
            td { (product.sku) }
            td { (product.name) }
            td { (product.category) }
            td { (product.qty) }
            td { (status_badge(product.status())) }
            td class="actions" {
                button class="btn btn-sm"
                    hx-get={ "/products/" (product.id) "/edit" }
                    hx-target={ "#" (ids::MODAL) } { "Edit" }
                button class="btn btn-sm btn-danger"
                    hx-delete={ "/products/" (product.id) }
                    hx-confirm="Delete this product?"
                    hx-include={ "#" (ids::SEARCH_INPUT) ", #" (ids::CATEGORY_FILTER) }
                    hx-target={ "#" (ids::INVENTORY_ROWS) } { "Delete" }
            }
        }
    }
}

/// Table body rows, or a single "no products" row
pub fn inventory_rows(products: &[&Product]) -> Markup {
    html! {
        @if products.is_empty() {
            tr { td colspan="7" class="empty" { "No products found" } }
        } @else {
            @for product in products {
                (product_row(product))
            }
        }
    }
}

/// Category dropdown; swapped out of band when the catalog gains a category
pub fn category_filter(categories: &[&str], selected: &str) -> Markup {
    html! {
        select id=(ids::CATEGORY_FILTER) name="category"
            hx-get="/inventory/rows" hx-trigger="change"
            hx-target={ "#" (ids::INVENTORY_ROWS) }
            hx-include={ "#" (ids::SEARCH_INPUT) } {
            option value="" selected[selected.is_empty()] { "All categories" }
            @for c in categories {
                option value=(c) selected[*c == selected] { (c) }
            }
        }
    }
}

pub fn inventory_page(
    products: &[&Product],
    categories: &[&str],
    text: &str,
    category: &str,
) -> Markup {
    let content = html! {
        div class="toolbar" {
            input type="search" id=(ids::SEARCH_INPUT) name="q" value=(text)
                placeholder="Search by name or SKU"
                hx-get="/inventory/rows" hx-trigger="input changed delay:200ms, search"
                hx-target={ "#" (ids::INVENTORY_ROWS) }
                hx-include={ "#" (ids::CATEGORY_FILTER) };
            div id=(ids::CATEGORY_SLOT) { (category_filter(categories, category)) }
            button class="btn btn-primary" hx-get="/products/new" hx-target={ "#" (ids::MODAL) } {
                "Add Product"
            }
        }
        table class="table" {
            thead {
                tr {
                    th { "Image" } th { "SKU" } th { "Name" } th { "Category" }
                    th { "Qty" } th { "Status" } th { "Actions" }
                }
            }
            tbody id=(ids::INVENTORY_ROWS) { (inventory_rows(products)) }
        }
    };
    layout("Inventory", Nav::Inventory, content)
}

// ============================================================================
// PRODUCT MODAL
// ============================================================================

fn text_field(ctx: &FormContext, name: &str, label: &str, kind: &str, required: bool) -> Markup {
    let class = if ctx.has_error(name) { "form-group has-error" } else { "form-group" };
    html! {
        div class=(class) {
            label for={ "product-" (name) } { (label) }
            input id={ "product-" (name) } name=(name) type=(kind) value=(ctx.value(name)) required[required];
            (field_error(ctx, name))
        }
    }
}

/// Add/edit modal. An `id` value in the context makes it an edit form.
pub fn product_modal(ctx: &FormContext) -> Markup {
    let editing = !ctx.value("id").trim().is_empty();
    html! {
        div class="modal active" {
            div class="modal-content" {
                header class="modal-header" {
                    h2 { @if editing { "Edit Product" } @else { "Add Product" } }
                    button type="button" class="close"
                        hx-get="/modal/close" hx-target={ "#" (ids::MODAL) } { "×" }
                }
                form hx-post="/products" hx-target={ "#" (ids::INVENTORY_ROWS) } hx-swap="innerHTML" {
                    input type="hidden" name="id" value=(ctx.value("id"));
                    (field_error(ctx, "id"))
                    (text_field(ctx, "sku", "SKU", "text", true))
                    (text_field(ctx, "name", "Name", "text", true))
                    (text_field(ctx, "category", "Category", "text", true))
                    (text_field(ctx, "qty", "Quantity", "number", true))
                    (text_field(ctx, "image", "Image URL", "url", false))
                    div class="modal-actions" {
                        button type="button" class="btn"
                            hx-get="/modal/close" hx-target={ "#" (ids::MODAL) } { "Cancel" }
                        button type="submit" class="btn btn-primary" { "Save" }
                    }
                }
            }
        }
    }
}
