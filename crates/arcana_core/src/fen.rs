//! Position strings: standard FEN extended with the variant piece letters
//! (A, C, M, G, H, X). The last two counter fields are optional.

use crate::board::{Board, CastleRights};
use crate::error::FenError;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = Board::new();
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let piece = Piece::from_letter(ch).ok_or(FenError::PieceLetter(ch))?;
                    let sq = square(file, rank).ok_or(FenError::RankWidth { rank: rank_idx })?;
                    board.put(sq, piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: rank_idx });
            }
        }

        let side = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(stm_part.to_string())),
        };
        board.set_side(side);

        let mut castling = CastleRights::empty();
        if castle_part != "-" {
            for c in castle_part.chars() {
                castling |= match c {
                    'K' => CastleRights::WK,
                    'Q' => CastleRights::WQ,
                    'k' => CastleRights::BK,
                    'q' => CastleRights::BQ,
                    _ => return Err(FenError::Castling(castle_part.to_string())),
                };
            }
        }
        board.set_castling(castling);

        if ep_part != "-" {
            let ep = coord_to_sq(ep_part).ok_or_else(|| FenError::EnPassant(ep_part.to_string()))?;
            board.set_ep(Some(ep));
        }

        board.fifty = halfmove_part
            .parse()
            .map_err(|_| FenError::Counter(halfmove_part.to_string()))?;
        board.fullmove = fullmove_part
            .parse()
            .map_err(|_| FenError::Counter(fullmove_part.to_string()))?;

        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                match square(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = self.castling();
        if rights.is_empty() {
            out.push('-');
        } else {
            for (flag, c) in [
                (CastleRights::WK, 'K'),
                (CastleRights::WQ, 'Q'),
                (CastleRights::BK, 'k'),
                (CastleRights::BQ, 'q'),
            ] {
                if rights.contains(flag) {
                    out.push(c);
                }
            }
        }

        out.push(' ');
        match self.ep().and_then(sq_to_coord) {
            Some(coord) => out.push_str(&coord),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.fifty, self.fullmove));
        out
    }
}
