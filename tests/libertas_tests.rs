#[cfg(test)]
pub mod libertas_tests {
    use num_bigint::BigUint;

    use libertas::libertas::{LibertasClient, LibertasServer};
    use libertas::zhao_nishide::{ZnClient, ZnServer};
    use libertas::{Op, Update};

    type Client = LibertasClient<ZnClient<BigUint>>;
    type Server = LibertasServer<ZnServer<BigUint>>;

    fn setup_pair(average_keyword_length: usize) -> (Client, Server) {
        let mut client = LibertasClient::new(ZnClient::new(0.01, average_keyword_length));
        client.setup((256, 2048)).unwrap();
        let mut server = LibertasServer::new(ZnServer::new());
        server.build_index();
        (client, server)
    }

    fn search(client: &Client, server: &Server, q: &str) -> Vec<u64> {
        let reply = server.search(&client.srch_token(q).unwrap());
        client.dec_search(&reply).unwrap()
    }

    fn search_sorted(client: &Client, server: &Server, q: &str) -> Vec<u64> {
        let mut result = search(client, server, q);
        result.sort();
        result
    }

    /// Bloom filters over-approximate, so expectations are containment,
    /// not equality.
    fn assert_contains(result: &[u64], expected: &[u64]) {
        for ind in expected {
            assert!(
                result.contains(ind),
                "expected {:?} to contain {:?}",
                result,
                expected
            );
        }
    }

    #[test]
    fn test_setup() {
        let security_parameter = (256, 2048);
        let mut client = LibertasClient::new(ZnClient::<BigUint>::new(0.01, 6));
        client.setup(security_parameter).unwrap();

        assert_eq!(security_parameter.0 / 8, client.k.as_ref().unwrap().len());
        assert_eq!(0, client.t);
    }

    #[test]
    fn test_setup_rejects_bad_aes_strength() {
        use libertas::SseError;

        let mut client = LibertasClient::new(ZnClient::<BigUint>::new(0.01, 6));
        assert_eq!(Err(SseError::InvalidKeyLength(64)), client.setup((512, 2048)));
    }

    #[test]
    fn test_encrypting_updates() {
        let (client, _server) = setup_pair(3);
        let update = Update {
            t: 1,
            op: Op::Add,
            ind: 2,
            w: "abc".to_string(),
        };

        let cipher_text = client.encrypt_update(1, Op::Add, 2, "abc").unwrap();
        assert_eq!(update, client.decrypt_update(&cipher_text).unwrap());
    }

    #[test]
    fn test_add_token_uniqueness() {
        let (mut client, _server) = setup_pair(4);
        let add_token = client.add_token(1, "test").unwrap();
        let add_token2 = client.add_token(1, "test").unwrap();
        assert_ne!(add_token, add_token2);
    }

    #[test]
    fn test_delete_token_uniqueness() {
        let (mut client, _server) = setup_pair(4);
        let del_token = client.del_token(1, "test").unwrap();
        let del_token2 = client.del_token(1, "test").unwrap();
        assert_ne!(del_token, del_token2);
    }

    #[test]
    fn test_timestamps_advance_per_update() {
        let (mut client, _server) = setup_pair(4);
        client.add_token(1, "test").unwrap();
        client.del_token(1, "test").unwrap();
        client.add_token(2, "test").unwrap();
        assert_eq!(3, client.t);
    }

    #[test]
    fn test_simple_add() {
        let (mut client, mut server) = setup_pair(6);
        let add_token = client.add_token(1, "abc").unwrap();
        server.add(add_token);
        assert_eq!(vec![1], search(&client, &server, "abc"));
    }

    #[test]
    fn test_add_multiple_keywords() {
        let (mut client, mut server) = setup_pair(6);
        let keywords = ["abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi"];

        for keyword in keywords {
            let add_token = client.add_token(1, keyword).unwrap();
            server.add(add_token);
        }
        for keyword in keywords {
            assert_eq!(vec![1], search(&client, &server, keyword));
        }
    }

    #[test]
    fn test_simple_delete() {
        let (mut client, mut server) = setup_pair(6);
        let keywords = ["abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi"];

        for keyword in keywords {
            let add_token = client.add_token(1, keyword).unwrap();
            server.add(add_token);
            let add_token = client.add_token(2, keyword).unwrap();
            server.add(add_token);
        }

        for keyword in keywords {
            let del_token = client.del_token(1, keyword).unwrap();
            server.delete(del_token);
            assert_eq!(vec![2], search(&client, &server, keyword));
        }
        for keyword in keywords {
            let del_token = client.del_token(2, keyword).unwrap();
            server.delete(del_token);
            assert_eq!(Vec::<u64>::new(), search(&client, &server, keyword));
        }
    }

    #[test]
    fn test_re_adding_after_delete() {
        let (mut client, mut server) = setup_pair(6);
        let add_token = client.add_token(1, "test").unwrap();
        server.add(add_token);
        let del_token = client.del_token(1, "test").unwrap();
        server.delete(del_token);
        let re_add_token = client.add_token(1, "test").unwrap();
        server.add(re_add_token);
        assert_eq!(vec![1], search(&client, &server, "test"));
    }

    #[test]
    fn test_add_delete_add_single_character_keyword() {
        let (mut client, mut server) = setup_pair(10);
        let add_token = client.add_token(1, "t").unwrap();
        server.add(add_token);
        let del_token = client.del_token(1, "t").unwrap();
        server.delete(del_token);
        let add_token = client.add_token(1, "t").unwrap();
        server.add(add_token);
        assert_eq!(vec![1], search(&client, &server, "t"));
    }

    #[test]
    fn test_delete_hides_only_the_deleted_document() {
        let (mut client, mut server) = setup_pair(10);
        let add_token = client.add_token(1, "abc").unwrap();
        server.add(add_token);
        let add_token = client.add_token(2, "abc").unwrap();
        server.add(add_token);
        let del_token = client.del_token(1, "abc").unwrap();
        server.delete(del_token);

        assert_eq!(vec![2], search(&client, &server, "abc"));
        assert_eq!(vec![2], search(&client, &server, "a*c"));
    }

    #[test]
    fn test_dec_search_is_order_independent() {
        let (mut client, mut server) = setup_pair(6);
        for keyword in ["abc", "abd", "abe"] {
            let add_token = client.add_token(1, keyword).unwrap();
            server.add(add_token);
        }
        let del_token = client.del_token(1, "abd").unwrap();
        server.delete(del_token);

        // Reverse the reply to simulate a server that reorders records;
        // the timestamp sort must still replay deletes after their adds.
        let mut reply = server.search(&client.srch_token("ab_").unwrap());
        reply.reverse();
        let result = client.dec_search(&reply).unwrap();
        assert_eq!(vec![1], result);

        let mut reply = server.search(&client.srch_token("abd").unwrap());
        reply.reverse();
        assert_eq!(Vec::<u64>::new(), client.dec_search(&reply).unwrap());
    }

    #[test]
    fn test_search_empty_index() {
        let (client, server) = setup_pair(12);
        for query in ["abc", "_", "*", ""] {
            assert_eq!(Vec::<u64>::new(), search(&client, &server, query));
        }
    }

    #[test]
    fn test_empty_query_matches_empty_keyword() {
        let (mut client, mut server) = setup_pair(12);
        let keywords = ["abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi", ""];

        for (ind, keyword) in keywords.iter().enumerate() {
            let add_token = client.add_token(ind as u64, keyword).unwrap();
            server.add(add_token);
        }
        assert_contains(&search(&client, &server, ""), &[7]);
    }

    #[test]
    fn test_simple_search() {
        let (mut client, mut server) = setup_pair(12);
        let keywords = ["abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi"];

        for (ind, keyword) in keywords.iter().enumerate() {
            let add_token = client.add_token(ind as u64, keyword).unwrap();
            server.add(add_token);
        }
        for (ind, keyword) in keywords.iter().enumerate() {
            assert_eq!(vec![ind as u64], search(&client, &server, keyword));
        }
    }

    #[test]
    fn test_search_multiple_matches() {
        let (mut client, mut server) = setup_pair(12);
        let number_of_documents = 100;

        for ind in 0..number_of_documents {
            let add_token = client.add_token(ind, "abc").unwrap();
            server.add(add_token);
        }
        let result = search_sorted(&client, &server, "abc");
        assert_eq!((0..number_of_documents).collect::<Vec<u64>>(), result);
    }

    #[test]
    fn test_singular_wildcard() {
        let (mut client, mut server) = setup_pair(10);
        let keywords = ["cat", "cut", "sit", "cet", "dot", "cyt", "sat"];

        for (ind, keyword) in keywords.iter().enumerate() {
            let add_token = client.add_token(ind as u64, keyword).unwrap();
            server.add(add_token);
        }

        assert_contains(&search(&client, &server, "c_t"), &[0, 1, 3, 5]);
        assert_contains(&search(&client, &server, "__t"), &[0, 1, 2, 3, 4, 5, 6]);
        assert_contains(&search(&client, &server, "cat_"), &[]);
        assert_contains(&search(&client, &server, "_a_"), &[0, 6]);
        assert_contains(&search(&client, &server, "___"), &[0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_plural_wildcard() {
        let (mut client, mut server) = setup_pair(12);
        let keywords = ["", "test", "testcase", "testcasesimulator", "testcasesimulatorproof"];

        for (ind, keyword) in keywords.iter().enumerate() {
            let add_token = client.add_token(ind as u64, keyword).unwrap();
            server.add(add_token);
        }

        assert_contains(&search(&client, &server, "*"), &[0, 1, 2, 3, 4]);
        assert_contains(&search(&client, &server, "test"), &[1]);
        assert_contains(&search(&client, &server, "test*"), &[1, 2, 3, 4]);
        assert_contains(&search(&client, &server, "*test"), &[1]);
        assert_contains(&search(&client, &server, "*test*"), &[1, 2, 3, 4]);
        assert_contains(&search(&client, &server, "*es*es*"), &[3, 4]);
        assert_contains(&search(&client, &server, "*simulator*"), &[3, 4]);
    }

    #[test]
    fn test_date_searches() {
        let (mut client, mut server) = setup_pair(10);
        let keywords = [
            "25-01-1996",
            "15-07-1996",
            "06-10-1996",
            "25-01-2000",
            "14-03-2001",
            "11-09-2001",
            "01-01-2021",
            "16-01-2021",
            "20-07-2021",
        ];

        for (ind, keyword) in keywords.iter().enumerate() {
            let add_token = client.add_token(ind as u64, keyword).unwrap();
            server.add(add_token);
        }

        assert_contains(&search(&client, &server, "25-01-1996"), &[0]);
        assert_contains(&search(&client, &server, "__-__-2001"), &[4, 5]);
        assert_contains(&search(&client, &server, "25-01-____"), &[0, 3]);
        assert_contains(&search(&client, &server, "*-1996"), &[0, 1, 2]);
    }

    #[test]
    fn test_complex_searches() {
        let (mut client, mut server) = setup_pair(10);
        let keywords = ["abc", "aba", "bac", "cab", "abcabcabc"];

        for (ind, keyword) in keywords.iter().enumerate() {
            let add_token = client.add_token(ind as u64, keyword).unwrap();
            server.add(add_token);
        }

        assert_contains(&search(&client, &server, "*a*"), &[0, 1, 2, 3, 4]);
        assert_contains(&search(&client, &server, "a*"), &[0, 1, 4]);
        assert_contains(&search(&client, &server, "*c"), &[0, 2, 4]);
        assert_contains(&search(&client, &server, "*ab*"), &[0, 1, 3, 4]);
        assert_contains(&search(&client, &server, "ab_"), &[0, 1]);
        assert_contains(&search(&client, &server, "*c_bc_*"), &[4]);
        assert_contains(&search(&client, &server, "*d*"), &[]);
    }
}
