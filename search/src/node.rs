use std::rc::Rc;

/// An entry of the search tree.
///
/// Children keep their parent alive through an `Rc`, so several children can share a
/// parent and the whole tree is freed once the last leaf is dropped.
#[derive(Debug)]
pub struct Node<R, A> {
    state: R,
    parent: Option<Rc<Node<R, A>>>,
    action: Option<A>,
    depth: usize,
}

impl<R: Copy, A> Node<R, A> {
    /// The node for the start state, without parent or action
    pub fn root(state: R) -> Rc<Self> {
        Rc::new(Self {
            state,
            parent: None,
            action: None,
            depth: 0,
        })
    }

    /// A node reached from `parent` by taking `action`
    pub fn child(parent: &Rc<Self>, action: A, state: R) -> Rc<Self> {
        Rc::new(Self {
            state,
            parent: Some(Rc::clone(parent)),
            action: Some(action),
            depth: parent.depth + 1,
        })
    }

    pub fn state(&self) -> R {
        self.state
    }

    pub fn parent(&self) -> Option<&Rc<Node<R, A>>> {
        self.parent.as_ref()
    }

    /// Number of actions between the root and this node
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<R: Copy, A: Copy> Node<R, A> {
    pub fn action(&self) -> Option<A> {
        self.action
    }

    /// Walks the parent chain back to the root and returns the actions and states that
    /// lead from the root to this node. The root state itself is not included.
    pub fn backtrack(&self) -> (Vec<A>, Vec<R>) {
        let mut actions = Vec::with_capacity(self.depth);
        let mut cells = Vec::with_capacity(self.depth);

        let mut node = self;
        while let (Some(parent), Some(action)) = (node.parent.as_deref(), node.action) {
            actions.push(action);
            cells.push(node.state);
            node = parent;
        }

        actions.reverse();
        cells.reverse();

        (actions, cells)
    }
}
