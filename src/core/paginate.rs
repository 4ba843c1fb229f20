//! Keyset pagination over soft-deleted, ordered collections
//!
//! A bounded (LIMIT-ed) query can only return the N closest matches in one
//! scan direction. Paging forward scans in the display order past the cursor;
//! paging backward scans in the *opposite* direction to grab the closest
//! preceding N, then reverses the slice, so callers always receive records in
//! the order they asked for.
//!
//! The engine is stateless: every call builds its filters from scratch,
//! issues one bounded fetch and, when metadata is requested, two existence
//! probes. It is safe to call concurrently from any number of request
//! handlers sharing a store. Consistency across separate calls is
//! deliberately weak — concurrent writers can make a navigating client skip
//! or re-see a record whose position changed between calls. That is accepted
//! keyset behavior, not a defect.

use crate::core::cursor::Cursor;
use crate::core::entity::Content;
use crate::core::error::{ApiError, PaginationError};
use crate::core::query::{Page, PageMeta, PageRequest, SortDirection};
use crate::core::store::{CmpOp, Filter, OrderedStore, SortKey};

/// Navigation intent decoded from a page request
enum Navigation {
    /// No cursor: the first page in display order
    First,
    /// Follow a `nextCursor`
    Next(Cursor),
    /// Follow a `prevCursor`
    Prev(Cursor),
}

/// Fetch one page of `store` matching `base`, positioned by `request`.
///
/// With `with_meta` set, the returned metadata carries `nextCursor` /
/// `prevCursor` (plus ready-made URLs) if and only if a further page exists
/// in that direction, determined by existence probes. Page length alone
/// cannot distinguish "exactly size records total" from "more remain", so
/// the probes are not optional bookkeeping.
pub async fn paginate<T, S>(
    store: &S,
    base: &Filter,
    request: &PageRequest,
    with_meta: bool,
) -> Result<Page<T>, ApiError>
where
    T: Content,
    S: OrderedStore<T> + ?Sized,
{
    let field = request.cursor_field.as_str();
    let size = request.size();

    let kind = T::cursor_field_kind(field).ok_or_else(|| {
        PaginationError::UnsupportedCursorField {
            field: field.to_string(),
        }
    })?;

    // prevCursor takes precedence when both cursors are supplied.
    let navigation = if let Some(raw) = &request.prev_cursor {
        Navigation::Prev(Cursor::decode(raw, field, kind)?)
    } else if let Some(raw) = &request.next_cursor {
        Navigation::Next(Cursor::decode(raw, field, kind)?)
    } else {
        Navigation::First
    };

    let (scan_filter, scan_direction, reverse) = match &navigation {
        Navigation::First => (page_filter(base, field, None), request.order, false),
        Navigation::Next(cursor) => {
            let op = comparison(request.order, true);
            (
                page_filter(base, field, Some((cursor, op))),
                request.order,
                false,
            )
        }
        Navigation::Prev(cursor) => {
            let op = comparison(request.order, false);
            (
                page_filter(base, field, Some((cursor, op))),
                request.order.reversed(),
                true,
            )
        }
    };

    tracing::debug!(
        resource = T::resource_name(),
        cursor = field,
        order = request.order.as_str(),
        scan = scan_direction.as_str(),
        size,
        "executing keyset scan"
    );

    let mut data = store
        .find(&scan_filter, &sort_keys(field, scan_direction), size)
        .await?;

    if reverse {
        data.reverse();
    }

    let mut meta = PageMeta::new(field, size, request.order);

    if with_meta && !data.is_empty() {
        let first = Cursor::for_record(&data[0], field)?;
        let last = Cursor::for_record(&data[data.len() - 1], field)?;

        // Probe past the page edges: next past the last element, prev past
        // the first. Independent reads, so they run concurrently.
        let next_probe = page_filter(base, field, Some((&last, comparison(request.order, true))));
        let prev_probe = page_filter(base, field, Some((&first, comparison(request.order, false))));

        let (after, before) = tokio::try_join!(
            store.find_one(&next_probe),
            store.find_one(&prev_probe)
        )?;

        if after.is_some() {
            meta.set_next(last.encode());
        }
        if before.is_some() {
            meta.set_prev(first.encode());
        }
    }

    Ok(Page { data, meta })
}

/// Comparison operator boxing records strictly past a cursor.
///
/// `toward_next` distinguishes the two navigation intents:
///
/// | order | toward_next | op |
/// |-------|-------------|----|
/// | desc  | true        | <  |
/// | asc   | true        | >  |
/// | desc  | false       | >  |
/// | asc   | false       | <  |
fn comparison(order: SortDirection, toward_next: bool) -> CmpOp {
    match (order, toward_next) {
        (SortDirection::Desc, true) | (SortDirection::Asc, false) => CmpOp::Lt,
        (SortDirection::Asc, true) | (SortDirection::Desc, false) => CmpOp::Gt,
    }
}

/// Predicate selecting records strictly past `cursor` under `op`.
///
/// Paginating by `id`, a single comparison suffices. For any other field the
/// order is lexicographic on `(field, id)`, expressed as: strictly past the
/// field value, OR tied on the field value and past the id.
fn cursor_predicate(field: &str, cursor: &Cursor, op: CmpOp) -> Filter {
    match &cursor.secondary {
        None => Filter::cmp("id", op, cursor.id),
        Some(value) => Filter::any(vec![
            Filter::cmp(field, op, value.clone()),
            Filter::all(vec![
                Filter::eq(field, value.clone()),
                Filter::cmp("id", op, cursor.id),
            ]),
        ]),
    }
}

/// Complete filter for one scan or probe: the caller's base filter, the
/// soft-delete exclusion, and optionally a cursor predicate. Built fresh for
/// every query.
fn page_filter(base: &Filter, field: &str, cursor: Option<(&Cursor, CmpOp)>) -> Filter {
    let mut clauses = vec![base.clone(), Filter::is_null("deleted_at")];
    if let Some((cursor, op)) = cursor {
        clauses.push(cursor_predicate(field, cursor, op));
    }
    Filter::all(clauses)
}

/// Sort of the scan: the cursor field then `id` as tiebreaker, both in the
/// scan direction; `id` alone when it is the cursor field.
fn sort_keys(field: &str, direction: SortDirection) -> Vec<SortKey> {
    if field == "id" {
        vec![SortKey::new("id", direction)]
    } else {
        vec![
            SortKey::new(field, direction),
            SortKey::new("id", direction),
        ]
    }
}
