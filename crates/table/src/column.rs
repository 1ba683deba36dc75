//! Column descriptors: typed accessors plus presentation metadata.

use stockroom_core::CellValue;

type Accessor<T> = Box<dyn Fn(&T) -> CellValue + Send + Sync>;
type Renderer<T> = Box<dyn Fn(&CellValue, &T, usize) -> Cell + Send + Sync>;

/// Display content of one rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub content: String,
    /// The content handles its own clicks (buttons, links, steppers).
    pub interactive: bool,
}

impl Cell {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            interactive: false,
        }
    }

    pub fn interactive(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            interactive: true,
        }
    }
}

/// How one field of `T` is read, sorted and presented.
pub struct Column<T> {
    key: String,
    label: String,
    sortable: bool,
    width: Option<String>,
    accessor: Accessor<T>,
    render: Option<Renderer<T>>,
}

impl<T> Column<T> {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            width: None,
            accessor: Box::new(accessor),
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Custom cell renderer, called with `(value, row, row_index)`.
    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &T, usize) -> Cell + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn width_hint(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// Runtime value of this column's field in `row`.
    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    /// Display content for `row`: the custom renderer if any, otherwise the
    /// stringified value (`Null` becomes the empty string).
    pub fn render_cell(&self, row: &T, index: usize) -> Cell {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row, index),
            None => Cell::text(value.to_string()),
        }
    }
}

impl<T> core::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        note: Option<&'static str>,
    }

    #[test]
    fn default_render_stringifies_and_blanks_null() {
        let name = Column::new("name", "Name", |i: &Item| i.name.into());
        let note = Column::new("note", "Note", |i: &Item| i.note.into());
        let item = Item { name: "Desk", note: None };

        assert_eq!(name.render_cell(&item, 0), Cell::text("Desk"));
        assert_eq!(note.render_cell(&item, 0), Cell::text(""));
    }

    #[test]
    fn custom_render_receives_value_row_and_index() {
        let column = Column::new("name", "Name", |i: &Item| i.name.into())
            .render_with(|value, row: &Item, index| Cell::interactive(format!("{index}:{value}:{}", row.name.len())));
        let cell = column.render_cell(&Item { name: "Desk", note: None }, 3);
        assert_eq!(cell.content, "3:Desk:4");
        assert!(cell.interactive);
    }
}
