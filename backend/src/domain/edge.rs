//! Like and follow edges between profiles and content.
//!
//! All three join tables share one shape: a composite primary key over a
//! source column and a target column, both foreign keys with cascading
//! deletes. [`EdgeRelation`] names the table and columns; [`Edge`] carries
//! typed endpoints so callers cannot pass a comment id where a post id is
//! expected.

use std::fmt;

use super::{CommentId, PostId, UserId};

/// Join relation backing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeRelation {
    /// `post_likes`: profile likes post.
    PostLike,
    /// `comment_likes`: profile likes comment.
    CommentLike,
    /// `follows`: profile follows profile.
    Follow,
}

impl EdgeRelation {
    /// Every relation, in declaration order.
    pub const ALL: [Self; 3] = [Self::PostLike, Self::CommentLike, Self::Follow];

    /// Table holding the edges.
    pub const fn table(self) -> &'static str {
        match self {
            Self::PostLike => "post_likes",
            Self::CommentLike => "comment_likes",
            Self::Follow => "follows",
        }
    }

    /// Column holding the acting profile.
    pub const fn source_column(self) -> &'static str {
        match self {
            Self::PostLike | Self::CommentLike => "liker_id",
            Self::Follow => "follower_id",
        }
    }

    /// Column holding the liked or followed entity.
    pub const fn target_column(self) -> &'static str {
        match self {
            Self::PostLike => "post_id",
            Self::CommentLike => "comment_id",
            Self::Follow => "followed_id",
        }
    }
}

impl fmt::Display for EdgeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PostLike => "post like",
            Self::CommentLike => "comment like",
            Self::Follow => "follow",
        };
        f.write_str(label)
    }
}

/// A single edge with typed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// `liker` likes `post`.
    PostLike {
        /// Profile giving the like.
        liker: UserId,
        /// Liked post.
        post: PostId,
    },
    /// `liker` likes `comment`.
    CommentLike {
        /// Profile giving the like.
        liker: UserId,
        /// Liked comment.
        comment: CommentId,
    },
    /// `follower` follows `followed`.
    Follow {
        /// Profile doing the following.
        follower: UserId,
        /// Profile being followed.
        followed: UserId,
    },
}

impl Edge {
    /// Relation this edge belongs to.
    pub fn relation(self) -> EdgeRelation {
        match self {
            Self::PostLike { .. } => EdgeRelation::PostLike,
            Self::CommentLike { .. } => EdgeRelation::CommentLike,
            Self::Follow { .. } => EdgeRelation::Follow,
        }
    }

    /// Raw id stored in [`EdgeRelation::source_column`].
    pub fn source(self) -> i64 {
        match self {
            Self::PostLike { liker, .. } | Self::CommentLike { liker, .. } => liker.get(),
            Self::Follow { follower, .. } => follower.get(),
        }
    }

    /// Raw id stored in [`EdgeRelation::target_column`].
    pub fn target(self) -> i64 {
        match self {
            Self::PostLike { post, .. } => post.get(),
            Self::CommentLike { comment, .. } => comment.get(),
            Self::Follow { followed, .. } => followed.get(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.relation(), self.source(), self.target())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn user(raw: i64) -> UserId {
        UserId::new(raw).expect("valid user id")
    }

    #[rstest]
    #[case(EdgeRelation::PostLike, "post_likes", "liker_id", "post_id")]
    #[case(EdgeRelation::CommentLike, "comment_likes", "liker_id", "comment_id")]
    #[case(EdgeRelation::Follow, "follows", "follower_id", "followed_id")]
    fn relations_name_their_columns(
        #[case] relation: EdgeRelation,
        #[case] table: &str,
        #[case] source: &str,
        #[case] target: &str,
    ) {
        assert_eq!(relation.table(), table);
        assert_eq!(relation.source_column(), source);
        assert_eq!(relation.target_column(), target);
    }

    #[rstest]
    fn edges_expose_raw_endpoints() {
        let like = Edge::PostLike {
            liker: user(2),
            post: PostId::new(9).expect("post id"),
        };
        assert_eq!(like.relation(), EdgeRelation::PostLike);
        assert_eq!((like.source(), like.target()), (2, 9));

        let follow = Edge::Follow {
            follower: user(2),
            followed: user(1),
        };
        assert_eq!(follow.relation(), EdgeRelation::Follow);
        assert_eq!((follow.source(), follow.target()), (2, 1));
        assert_eq!(follow.to_string(), "follow 2 -> 1");
    }
}
