use crate::parse::operation::HttpMethod;

/// Bucket name used when no path segment yields a usable group.
pub const DEFAULT_GROUP: &str = "dftGroup";

/// Derive the default group and member keys for one operation.
///
/// The group is the first `/`-delimited segment of the path that is not a
/// `{placeholder}`, falling back to [`DEFAULT_GROUP`]. The member is the
/// operationId when present, otherwise a stable identifier built from the
/// method and path. A pure function: repeated calls on the same input always
/// return the same pair.
pub fn derive_group_and_member(
    path: &str,
    method: HttpMethod,
    operation_id: Option<&str>,
) -> (String, String) {
    let group = path
        .split('/')
        .find(|s| !s.is_empty() && !s.starts_with('{'))
        .unwrap_or(DEFAULT_GROUP)
        .to_string();

    let member = match operation_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => fallback_member(path, method),
    };

    (group, member)
}

/// Stable member name for operations without an operationId, e.g.
/// `GET /store/order/{orderId}` → `get_store_order_orderId`.
fn fallback_member(path: &str, method: HttpMethod) -> String {
    let mut name = method.as_str().to_string();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        name.push('_');
        name.extend(segment.chars().filter(|c| c.is_alphanumeric() || *c == '_'));
    }
    name
}
