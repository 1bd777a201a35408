mod todo;

pub use todo::{CreateTodo, Todo, TodoPatch, TodoResponse};
